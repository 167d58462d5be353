use crate::scale::Scale;

/// A group of bodies drawn together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layer {
    Earth,
    SolarSystem,
    Galaxy,
    Universe,
}

impl Layer {
    pub const ALL: [Layer; 4] = [Layer::Earth, Layer::SolarSystem, Layer::Galaxy, Layer::Universe];
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayerState {
    pub visible: bool,
    pub opacity: f32,
}

/// Renderer parameters for one scale.
///
/// Outer layers stay visible but dim as the view zooms out, so the previous
/// scale remains as context behind the current one.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneDirective {
    pub scale: Scale,
    /// When set, automatic camera moves and rotation are suspended.
    pub user_control: bool,
    layers: [LayerState; 4],
}

impl SceneDirective {
    pub fn for_scale(scale: Scale, user_control: bool) -> Self {
        let at_least = |floor: Scale| scale >= floor;

        let solar_opacity = match scale {
            Scale::Solar => 1.0,
            Scale::Galaxy => 0.5,
            _ => 0.2,
        };
        let galaxy_opacity = if scale == Scale::Galaxy { 1.0 } else { 0.5 };

        Self {
            scale,
            user_control,
            layers: [
                LayerState {
                    visible: scale == Scale::Earth,
                    opacity: 1.0,
                },
                LayerState {
                    visible: at_least(Scale::Solar),
                    opacity: solar_opacity,
                },
                LayerState {
                    visible: at_least(Scale::Galaxy),
                    opacity: galaxy_opacity,
                },
                LayerState {
                    visible: scale == Scale::Universe,
                    opacity: 1.0,
                },
            ],
        }
    }

    pub fn layer(&self, layer: Layer) -> LayerState {
        self.layers[layer as usize]
    }

    /// Visible layers with their opacity, innermost first.
    pub fn visible_layers(&self) -> impl Iterator<Item = (Layer, f32)> + '_ {
        Layer::ALL
            .into_iter()
            .map(|layer| (layer, self.layer(layer)))
            .filter(|(_, state)| state.visible)
            .map(|(layer, state)| (layer, state.opacity))
    }

    /// Whether bodies spin on their own.
    pub fn auto_rotate(&self) -> bool {
        !self.user_control
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn visible(scale: Scale) -> Vec<Layer> {
        SceneDirective::for_scale(scale, false)
            .visible_layers()
            .map(|(layer, _)| layer)
            .collect()
    }

    #[test]
    fn test_visibility_per_scale() {
        assert_eq!(visible(Scale::Earth), vec![Layer::Earth]);
        assert_eq!(visible(Scale::Solar), vec![Layer::SolarSystem]);
        assert_eq!(visible(Scale::Galaxy), vec![Layer::SolarSystem, Layer::Galaxy]);
        assert_eq!(
            visible(Scale::Universe),
            vec![Layer::SolarSystem, Layer::Galaxy, Layer::Universe]
        );
    }

    #[test]
    fn test_outer_layers_dim() {
        let galaxy = SceneDirective::for_scale(Scale::Galaxy, false);
        assert_eq!(galaxy.layer(Layer::SolarSystem).opacity, 0.5);
        assert_eq!(galaxy.layer(Layer::Galaxy).opacity, 1.0);

        let universe = SceneDirective::for_scale(Scale::Universe, false);
        assert_eq!(universe.layer(Layer::SolarSystem).opacity, 0.2);
        assert_eq!(universe.layer(Layer::Galaxy).opacity, 0.5);
    }

    #[test]
    fn test_user_control_stops_rotation() {
        assert!(SceneDirective::for_scale(Scale::Earth, false).auto_rotate());
        assert!(!SceneDirective::for_scale(Scale::Earth, true).auto_rotate());
    }
}
