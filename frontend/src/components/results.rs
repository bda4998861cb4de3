use crate::Model;
use shared::cycle::Phase;
use shared::view::{ADVICE_TITLE, DISTRIBUTION_TITLE, METRIC_TITLE, OutcomeView};
use yew::prelude::*;

pub fn render_results(model: &Model) -> Html {
    let Phase::Displayed { outcome, preview } = model.cycle.phase() else {
        return html! {};
    };
    let view = OutcomeView::from_outcome(outcome);

    html! {
        <div class="results-container column">
            <h2 title={format!("Analysis results for: {}", preview.file_name)}>
                <i class="fa-solid fa-chart-simple"></i>{" Analysis Results"}
            </h2>
            <div class="metric">
                <div class="metric-label">{ METRIC_TITLE }</div>
                <div class="metric-value">{ view.metric_value.clone() }</div>
                <div class="metric-delta">{ view.metric_delta.clone() }</div>
            </div>
            <div class="detailed-results">
                <h3>{ DISTRIBUTION_TITLE }</h3>
                <div class="result-bars">
                    { for view.indicators.iter().map(|indicator| html! {
                        <div class="result-item">
                            <div class="result-label">{ indicator.caption.clone() }</div>
                            <div class="result-bar-container">
                                <div class="result-bar" style={format!("width: {}%", indicator.fraction * 100.0)}></div>
                            </div>
                        </div>
                    })}
                </div>
            </div>
            <hr />
            <div class="advice">
                <h3>{ ADVICE_TITLE }</h3>
                <p class="advice-text">{ view.advice.clone() }</p>
            </div>
        </div>
    }
}
