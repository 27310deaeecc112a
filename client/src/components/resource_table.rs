//! Table view of admin resource records.

use leptos::prelude::*;

use crate::net::resources::{Resource, edit_route};

/// Render `records` with one row per record and an edit link per row.
pub fn resource_table<R: Resource>(records: Vec<R>) -> impl IntoView {
    if records.is_empty() {
        let message = format!("No {} yet.", R::PLURAL.to_lowercase());
        return view! { <p class="resource-table__empty">{message}</p> }.into_any();
    }

    let headers = R::COLUMNS
        .iter()
        .map(|c| view! { <th>{*c}</th> })
        .collect::<Vec<_>>();
    let rows = records
        .iter()
        .map(|record| {
            let cells = record
                .row()
                .into_iter()
                .map(|cell| view! { <td>{cell}</td> })
                .collect::<Vec<_>>();
            view! {
                <tr>
                    {cells}
                    <td>
                        <a class="btn btn--small" href={edit_route::<R>(record.id())}>
                            "Edit"
                        </a>
                    </td>
                </tr>
            }
        })
        .collect::<Vec<_>>();

    view! {
        <table class="resource-table">
            <thead>
                <tr>
                    {headers}
                    <th></th>
                </tr>
            </thead>
            <tbody>{rows}</tbody>
        </table>
    }
    .into_any()
}
