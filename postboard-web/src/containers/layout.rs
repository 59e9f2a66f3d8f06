use crate::containers::header::Header;
use web_sys::window;
use yew::{Children, Html, Properties, function_component, html, use_effect_with};

#[derive(Properties, PartialEq)]
pub struct LayoutProps {
    pub children: Children,
}

#[function_component(Layout)]
pub fn layout(props: &LayoutProps) -> Html {
    // Adds data-theme attribute to html tag for theme support
    use_effect_with((), |()| {
        if let Some(window) = window()
            && let Some(document) = window.document()
            && let Some(html_element) = document.document_element()
        {
            let _ = html_element.set_attribute("data-theme", "light");
        }
        || {}
    });

    html! {
        <div class="min-h-screen bg-base-200">
            <div class="container mx-auto max-w-6xl p-4">
                <Header />
                <main>
                    {props.children.clone()}
                </main>
            </div>
            <footer class="footer footer-center p-4 border-t border-base-300 text-base-content">
                <p>{"Postboard · Powered by Rust, Yew and DaisyUI"}</p>
            </footer>
        </div>
    }
}
