use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct PortalBackdropProps {
    #[prop_or_default]
    pub children: Html,
}

/// Full-screen dark backdrop that centers whichever page is active.
#[function_component(PortalBackdrop)]
pub fn portal_backdrop(props: &PortalBackdropProps) -> Html {
    html! {
        <div class="relative min-h-screen">
            <div class="fixed inset-0 bg-gray-950 -z-50"></div>
            <div class="relative z-0 flex min-h-screen flex-col items-center justify-center px-4 py-12">
                {props.children.clone()}
            </div>
        </div>
    }
}
