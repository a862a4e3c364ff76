use leptos::prelude::*;

/// Icon served from `public/icons`
#[component]
pub fn Icon(
    /// File name without the `.svg` extension
    name: &'static str,
    #[prop(default = "icon")] class: &'static str,
) -> impl IntoView {
    let icon_path = format!("/icons/{}.svg", name);

    view! {
        <img
            src=icon_path
            class=class
            alt=name
            draggable="false"
        />
    }
}

pub mod icons {
    pub const TABLE: &str = "table";
    pub const CHECK: &str = "check";
    pub const GRIP: &str = "grip";
    pub const X: &str = "x";
}
