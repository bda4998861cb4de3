use yew::prelude::*;

/// Renders the application header
pub fn render_header() -> Html {
    html! {
        <header class="app-header">
            <h1><i class="fa-solid fa-face-smile"></i> {" Facial Emotion Recognition System"}</h1>
            <p class="subtitle">{"Upload a face image to analyze its emotion"}</p>
        </header>
    }
}
