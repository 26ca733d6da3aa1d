use leptos::prelude::*;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BadgeVariant {
    Primary,
    Success,
    Warning,
    #[default]
    Neutral,
}

impl BadgeVariant {
    pub fn class(self) -> &'static str {
        match self {
            BadgeVariant::Primary => "badge--primary",
            BadgeVariant::Success => "badge--success",
            BadgeVariant::Warning => "badge--warning",
            BadgeVariant::Neutral => "badge--neutral",
        }
    }
}

/// Small inline label, e.g. the "new" marker of a staged user
#[component]
pub fn Badge(
    #[prop(optional)] variant: BadgeVariant,
    children: Children,
    /// Additional CSS classes
    #[prop(optional, into)]
    class: MaybeProp<String>,
) -> impl IntoView {
    let additional_class = move || class.get().unwrap_or_default();

    view! {
        <span class=move || format!("badge {} {}", variant.class(), additional_class())>
            {children()}
        </span>
    }
}
