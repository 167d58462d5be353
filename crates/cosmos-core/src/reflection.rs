//! Closing messages shown after the Universe scale.

/// Shown in order, one every [`crate::timing::FINAL_MESSAGE_UNITS`].
pub const FINAL_MESSAGES: [&str; 5] = [
    "Before the vast universe, has your worry grown a little lighter?",
    "The universe is so large, and we have explored so little of it",
    "The future is full of endless possibilities",
    "Do not let the troubles of this moment hold back your steps",
    "You are a one-of-a-kind presence in the universe",
];

/// Note displayed once the run has completed.
pub const COMPLETION_NOTE: &str = "Meditation complete, returning shortly...";

/// What the reflection overlay shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReflectionView {
    pub message: &'static str,
    pub index: usize,
    pub total: usize,
    /// A reminder of the worry, on the first message only.
    pub worry_recall: Option<String>,
    pub completed: bool,
}

impl ReflectionView {
    /// Builds the view for message `index`; out-of-range indices show the last message.
    pub fn new(index: usize, worry: &str, completed: bool) -> Self {
        let index = index.min(FINAL_MESSAGES.len() - 1);
        Self {
            message: FINAL_MESSAGES[index],
            index,
            total: FINAL_MESSAGES.len(),
            worry_recall: (index == 0 && !worry.is_empty()).then(|| recall_line(worry)),
            completed,
        }
    }

    /// Progress dots: `true` for every message already reached.
    pub fn progress(&self) -> Vec<bool> {
        (0..self.total).map(|position| position <= self.index).collect()
    }
}

/// The sentence that brings the user's worry back on the first message.
pub fn recall_line(worry: &str) -> String {
    format!("Think back on your worry: \"{}\"", worry)
}
