use crate::flow::{Node, Target};

/// What pressing an option will do, for choosing how to render its button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionKind {
    Step,
    WhatsApp,
    Navigate,
    /// The option leads to a missing step. Selecting it is refused.
    Unavailable,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionView {
    pub index: usize,
    pub label: String,
    pub kind: OptionKind,
}

/// The current step as a runtime or preview UI shows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepView {
    pub id: String,
    pub text: String,
    pub options: Vec<OptionView>,
    pub can_go_back: bool,
}

impl StepView {
    pub(super) fn new(node: &Node, can_go_back: bool) -> Self {
        let options = node
            .options
            .iter()
            .enumerate()
            .map(|(index, option)| OptionView {
                index,
                label: option.label.clone(),
                kind: match option.target {
                    Target::Step(_) => OptionKind::Step,
                    Target::WhatsApp => OptionKind::WhatsApp,
                    Target::OpenPath(_) => OptionKind::Navigate,
                    Target::Dangling(_) => OptionKind::Unavailable,
                },
            })
            .collect();

        Self {
            id: node.id.clone(),
            text: node.text.clone(),
            options,
            can_go_back,
        }
    }
}
