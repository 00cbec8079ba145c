//! Choice control: the reader-facing button for one choice.

use lightheart_story::domain::scene::Choice;
use serde::Serialize;

/// Event emitted when the reader activates a choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChoiceActivated {
    /// Label of the activated choice.
    pub label: String,
    /// Target scene identifier, unresolved.
    pub next: String,
    /// Feedback to show while the transition is pending.
    pub feedback: Option<String>,
}

impl From<&Choice> for ChoiceActivated {
    fn from(choice: &Choice) -> Self {
        Self {
            label: choice.label.clone(),
            next: choice.next.clone(),
            feedback: choice.feedback.clone(),
        }
    }
}

/// Stateless control for one choice. Refuses to emit while disabled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChoiceControl {
    /// Visible label.
    pub label: String,
    /// Label announced by assistive technology.
    pub aria_label: String,
    /// Set while the session is locked.
    pub disabled: bool,
    #[serde(skip)]
    activation: ChoiceActivated,
}

impl ChoiceControl {
    #[must_use]
    pub fn new(choice: &Choice, disabled: bool) -> Self {
        Self {
            label: choice.label.clone(),
            aria_label: format!("选择动作：{}", choice.label),
            disabled,
            activation: ChoiceActivated::from(choice),
        }
    }

    /// Emits the activation event, or nothing while disabled.
    #[must_use]
    pub fn activate(&self) -> Option<ChoiceActivated> {
        (!self.disabled).then(|| self.activation.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn help_choice() -> Choice {
        Choice {
            label: "帮助小鸟".to_owned(),
            next: "forest-help".to_owned(),
            feedback: Some("你的善意让小鸟安心了".to_owned()),
        }
    }

    #[test]
    fn test_enabled_control_emits_choice_payload() {
        let control = ChoiceControl::new(&help_choice(), false);

        let activated = control.activate().unwrap();

        assert_eq!(activated.label, "帮助小鸟");
        assert_eq!(activated.next, "forest-help");
        assert_eq!(activated.feedback.as_deref(), Some("你的善意让小鸟安心了"));
        assert_eq!(control.aria_label, "选择动作：帮助小鸟");
    }

    #[test]
    fn test_disabled_control_emits_nothing() {
        let control = ChoiceControl::new(&help_choice(), true);

        assert_eq!(control.activate(), None);
    }
}
