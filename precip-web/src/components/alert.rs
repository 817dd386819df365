//! Inline status message box.

use dioxus::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tone {
    Info,
    Success,
    Warning,
    Danger,
}

impl Tone {
    fn style(&self) -> &'static str {
        match self {
            Tone::Info => "background: #E3F2FD; color: #0D47A1; border: 1px solid #90CAF9;",
            Tone::Success => "background: #E8F5E9; color: #1B5E20; border: 1px solid #A5D6A7;",
            Tone::Warning => "background: #FFF8E1; color: #8D6E00; border: 1px solid #FFE082;",
            Tone::Danger => "background: #FFEBEE; color: #C62828; border: 1px solid #EF9A9A;",
        }
    }
}

#[derive(Props, Clone, PartialEq)]
pub struct AlertProps {
    pub tone: Tone,
    pub message: String,
}

/// Displays a message in a box colored by its tone.
#[component]
pub fn Alert(props: AlertProps) -> Element {
    let style = format!(
        "padding: 12px 16px; margin: 8px 0; border-radius: 4px; {}",
        props.tone.style()
    );

    rsx! {
        div {
            style: "{style}",
            "{props.message}"
        }
    }
}
