//! Single claim with its sources

use cc_core::report::{ClaimView, SourceView};
use leptos::*;

#[component]
pub fn ClaimCard(claim: ClaimView) -> impl IntoView {
    let tone = match claim.status_class.trim_start_matches("status ") {
        "true" | "verified" => "text-green-600",
        "false" => "text-red-600",
        "misleading" => "text-yellow-600",
        _ => "text-gray-600",
    };

    view! {
        <div class="claim p-4 rounded-lg border border-gray-200">
            <p><strong>"Claim:"</strong> " " {claim.claim}</p>
            <p class=format!("{} {}", claim.status_class, tone)>
                <strong>"Status:"</strong> " " {claim.status}
            </p>
            <p class="text-sm text-gray-600 mt-1">
                <strong>"Explanation:"</strong> " " {claim.explanation}
            </p>
            <h4 class="font-medium mt-2">"Sources:"</h4>
            <ul class="list-disc ml-6">
                {claim
                    .sources
                    .into_iter()
                    .map(|source| view! { <SourceItem source=source/> })
                    .collect_view()}
            </ul>
        </div>
    }
}

#[component]
fn SourceItem(source: SourceView) -> impl IntoView {
    let title = match source.href {
        Some(href) => view! {
            <a href=href target="_blank" rel="noopener noreferrer" class="text-blue-600 hover:underline">
                {source.title}
            </a>
        }
        .into_view(),
        None => view! { <span>{source.title}</span> }.into_view(),
    };

    view! {
        <li>{title} ": " {source.summary}</li>
    }
}
