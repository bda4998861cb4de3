use yew::prelude::*;

const INSTRUCTIONS: [&str; 4] = [
    "Upload a face image (JPG/PNG/GIF)",
    "Click the \"Analyze Emotion\" button",
    "View the emotion analysis results",
    "Get targeted coping advice",
];

pub fn render_sidebar() -> Html {
    html! {
        <aside class="sidebar">
            <h2>{"Instructions"}</h2>
            <ol class="instructions">
                { for INSTRUCTIONS.iter().map(|step| html! { <li>{ *step }</li> }) }
            </ol>
            <hr />
            <p class="caption">{"Technical support: deep learning-based facial emotion recognition"}</p>
        </aside>
    }
}
