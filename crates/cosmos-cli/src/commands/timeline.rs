use anyhow::{Context, Result};
use colored::Colorize;
use cosmos_application::{TimelineEntry, reference_timeline};
use cosmos_core::sequencer::SequencerEvent;

pub fn execute(json: bool) -> Result<()> {
    let timeline = reference_timeline();

    if json {
        let rendered =
            serde_json::to_string_pretty(&timeline).context("Failed to render timeline")?;
        println!("{}", rendered);
        return Ok(());
    }

    for entry in &timeline {
        println!("{:>6}  {}", format!("{}s", entry.at.as_secs()).dimmed(), describe(entry));
    }
    Ok(())
}

fn describe(entry: &TimelineEntry) -> String {
    match &entry.event {
        SequencerEvent::StateEntered(state) => format!("enter {}", state.to_string().bold()),
        SequencerEvent::ScaleChanged(scale) => format!("scale → {}", scale.label()),
        SequencerEvent::FinalMessage(index) => format!("closing message #{}", index + 1),
        SequencerEvent::AudioFadeStarted => "music fades out".to_string(),
        SequencerEvent::AudioReleased => "music released".to_string(),
        SequencerEvent::SessionReset => "session reset".to_string(),
        SequencerEvent::Navigate(route) => format!("navigate to {}", route),
    }
}
