use contracts::shared::normalizer::{normalize, Column, NormalizeOptions};
use leptos::prelude::*;
use serde_json::Value;

/// Label/value card for one record.
#[component]
pub fn DetailCard(
    title: &'static str,
    columns: &'static [Column],
    record: Value,
    opts: NormalizeOptions,
) -> impl IntoView {
    let row = normalize(&record, "_id", columns, &opts);

    view! {
        <section class="card">
            <h3 class="card__title">{title}</h3>
            <dl class="details-grid">
                {columns
                    .iter()
                    .map(|col| {
                        let cell = row.get(col.field);
                        let text = row.text(col.field);
                        let value = if col.link && cell.is_some_and(|c| !c.is_na()) {
                            view! {
                                <a href=text.clone() target="_blank" rel="noopener">"View"</a>
                            }
                            .into_any()
                        } else {
                            text.into_any()
                        };
                        view! {
                            <div class="details-grid__item">
                                <dt class="details-grid__label">{col.header}</dt>
                                <dd class="details-grid__value">{value}</dd>
                            </div>
                        }
                    })
                    .collect_view()}
            </dl>
        </section>
    }
}
