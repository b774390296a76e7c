//! Pure projection from poll data to the rendered form description. Keeping
//! this side-effect free lets the widget apps test rendering against fixed
//! data without any transport or UI toolkit in the loop.

use shared::domain::PollData;

pub const SUBMIT_LABEL: &str = "Vote";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionRow {
    /// Stable identifier for the rendered input. Distinct options may
    /// collide after whitespace normalization; the label text still
    /// distinguishes them, so collisions are permitted.
    pub element_id: String,
    /// Raw option string submitted as the vote value.
    pub value: String,
    /// Visible text: `"<option> (<n> votes)"`.
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollView {
    pub heading: String,
    pub rows: Vec<OptionRow>,
    pub submit_label: &'static str,
}

/// `option-` prefix plus the option text with every maximal whitespace run
/// collapsed to a single `-`, so labels with spaces still yield well-formed
/// identifiers.
pub fn option_element_id(option: &str) -> String {
    let mut id = String::with_capacity(option.len() + 7);
    id.push_str("option-");
    let mut in_whitespace = false;
    for ch in option.chars() {
        if ch.is_whitespace() {
            if !in_whitespace {
                id.push('-');
            }
            in_whitespace = true;
        } else {
            id.push(ch);
            in_whitespace = false;
        }
    }
    id
}

pub fn poll_view(poll: &PollData) -> PollView {
    PollView {
        heading: poll.question.clone(),
        rows: poll
            .options
            .iter()
            .map(|option| OptionRow {
                element_id: option_element_id(option),
                value: option.clone(),
                label: format!("{option} ({} votes)", poll.votes_for(option)),
            })
            .collect(),
        submit_label: SUBMIT_LABEL,
    }
}
