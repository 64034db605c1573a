//! Named-entity facetting widget for the sidebar.
//!
//! SYSTEM CONTEXT
//! ==============
//! Lists the named entities (persons, locations, corporations, events, misc)
//! recognised in the current record. Three views are offered: an overview in
//! page ranges, a recurrence ranking across the whole record, and a section
//! view of the pages around a slider position.
//!
//! DATA FLOW
//! =========
//! `NerState::endpoint` is memoised; every change of the derived query starts
//! one request. The previous request is aborted first and responses are
//! matched against the latest sequence number, so only the newest query ever
//! reaches the list.

use leptos::prelude::*;
use tags::{NerType, PageTags, TagSummary, TypeFilter};

use crate::app::NerMount;
use crate::state::ner::{NerMode, NerState, PAGE_RANGES};
use crate::state::ui::SidebarState;
use crate::util::ui_persistence::{NER_PAGE_RANGE_KEY, NER_TYPE_KEY, load_json, save_json};

const MODES: [(NerMode, &str); 3] =
    [(NerMode::Overview, "Overview"), (NerMode::Recurrence, "Recurrence"), (NerMode::Section, "Section")];

/// NER facetting sidebar widget.
#[component]
pub fn NerFacetting(mount: NerMount) -> impl IntoView {
    let sidebar = expect_context::<RwSignal<SidebarState>>();
    if !sidebar.with_untracked(|s| s.storage_available) {
        return view! {
            <div class="ner-facetting ner-facetting--disabled">
                <div class="alert alert-warning" role="alert">
                    "Local storage is not available. Named entity facetting is disabled."
                </div>
            </div>
        }
        .into_any();
    }

    let mut initial = NerState::new(mount.total_pages, mount.current_page);
    initial.restore(load_json::<u32>(NER_PAGE_RANGE_KEY), load_json::<String>(NER_TYPE_KEY).as_deref());
    let ner = RwSignal::new(initial);

    let persisted = Memo::new(move |_| ner.with(|s| (s.page_range, s.filter)));

    Effect::new(move || {
        let (range, filter) = persisted.get();
        save_json(NER_PAGE_RANGE_KEY, &range);
        save_json(NER_TYPE_KEY, &filter.as_segment());
    });

    #[cfg(feature = "csr")]
    {
        use std::cell::RefCell;
        use std::rc::Rc;

        use crate::net::api::{InFlight, fetch_tags, tags_url};

        let endpoint = Memo::new(move |_| ner.with(NerState::endpoint));
        let in_flight: Rc<RefCell<Option<InFlight>>> = Rc::new(RefCell::new(None));
        let rest_base = mount.rest_base.clone();
        let pi = mount.pi.clone();

        Effect::new(move || {
            let endpoint = endpoint.get();
            if let Some(previous) = in_flight.borrow_mut().take() {
                previous.abort();
            }
            let Some(seq) = ner.try_update(NerState::begin_request) else {
                return;
            };
            let url = tags_url(&rest_base, &pi, endpoint);
            log::debug!("ner: requesting {url}");

            let controller = web_sys::AbortController::new().ok();
            let signal = controller.as_ref().map(web_sys::AbortController::signal);
            let (request, handle) =
                futures::future::abortable(async move { fetch_tags(&url, signal.as_ref()).await });
            *in_flight.borrow_mut() = Some(InFlight::new(controller, handle));

            leptos::task::spawn_local(async move {
                let Ok(result) = request.await else {
                    return;
                };
                if let Err(message) = &result {
                    log::warn!("ner: {message}");
                }
                ner.update(|s| {
                    s.finish_request(seq, result);
                });
            });
        });
    }

    let total_pages = mount.total_pages.max(1);

    let on_type = move |ev| {
        if let Ok(filter) = event_target_value(&ev).parse::<TypeFilter>() {
            ner.update(|s| s.set_filter(filter));
        }
    };
    let on_range = move |ev| {
        if let Ok(range) = event_target_value(&ev).parse::<u32>() {
            ner.update(|s| s.set_page_range(range));
        }
    };
    let on_slider = move |ev| {
        if let Ok(page) = event_target_value(&ev).parse::<u32>() {
            ner.update(|s| s.set_slider(page));
        }
    };
    let on_search = move |ev| {
        let query = event_target_value(&ev);
        ner.update(|s| s.query = query);
    };

    let mode_is = move |mode: NerMode| ner.with(|s| s.mode == mode);
    let window_label = move || {
        let window = ner.with(NerState::window);
        format!("Pages {} - {}", window.start, window.end)
    };
    let order_label = move || match ner.with(|s| s.order) {
        tags::RecurrenceOrder::Asc => "Least frequent first",
        tags::RecurrenceOrder::Desc => "Most frequent first",
    };

    view! {
        <div class="ner-facetting">
            <div class="ner-facetting__tabs" role="tablist">
                {MODES
                    .into_iter()
                    .map(|(mode, label)| {
                        view! {
                            <button
                                class="ner-facetting__tab"
                                class:ner-facetting__tab--active=move || mode_is(mode)
                                role="tab"
                                on:click=move |_| ner.update(|s| s.set_mode(mode))
                            >
                                {label}
                            </button>
                        }
                    })
                    .collect_view()}
            </div>

            <div class="ner-facetting__filters">
                <select
                    class="ner-facetting__type"
                    prop:value=move || ner.with(|s| s.filter.as_segment())
                    on:change=on_type
                >
                    <option value="-">"All types"</option>
                    {NerType::ALL
                        .into_iter()
                        .map(|kind| view! { <option value=kind.as_str()>{type_label(kind)}</option> })
                        .collect_view()}
                </select>

                <Show when=move || !mode_is(NerMode::Recurrence)>
                    <select
                        class="ner-facetting__range"
                        prop:value=move || ner.with(|s| s.page_range.to_string())
                        on:change=on_range
                    >
                        {PAGE_RANGES
                            .into_iter()
                            .map(|range| view! { <option value=range.to_string()>{format!("{range} pages")}</option> })
                            .collect_view()}
                    </select>
                </Show>

                <Show when=move || mode_is(NerMode::Recurrence)>
                    <button class="ner-facetting__order" on:click=move |_| ner.update(NerState::toggle_order)>
                        {order_label}
                    </button>
                </Show>
            </div>

            <Show when=move || mode_is(NerMode::Section)>
                <div class="ner-facetting__section">
                    <input
                        class="ner-facetting__slider"
                        type="range"
                        min="1"
                        max=total_pages.to_string()
                        step="1"
                        prop:value=move || ner.with(|s| s.slider_value.to_string())
                        on:change=on_slider
                    />
                    <span class="ner-facetting__window">{window_label}</span>
                </div>
            </Show>

            <input
                class="ner-facetting__search"
                type="search"
                placeholder="Filter entities"
                prop:value=move || ner.with(|s| s.query.clone())
                on:input=on_search
            />

            <Show when=move || ner.with(|s| s.loading)>
                <div class="ner-facetting__loading">"Loading..."</div>
            </Show>

            {move || {
                ner.with(|s| s.error.clone())
                    .map(|message| view! { <div class="alert alert-danger" role="alert">{message}</div> })
            }}

            <div class="ner-facetting__results">
                {move || {
                    if mode_is(NerMode::Recurrence) {
                        summary_list(ner.with(NerState::summaries)).into_any()
                    } else {
                        page_list(ner.with(NerState::page_entries)).into_any()
                    }
                }}
            </div>
        </div>
    }
    .into_any()
}

fn type_label(kind: NerType) -> &'static str {
    match kind {
        NerType::Person => "Persons",
        NerType::Location => "Locations",
        NerType::Corporation => "Corporations",
        NerType::Event => "Events",
        NerType::Misc => "Miscellaneous",
    }
}

fn tag_class(kind: NerType) -> String {
    format!("ner-facetting__tag ner-facetting__tag--{}", kind.as_str())
}

fn summary_list(summaries: Vec<TagSummary>) -> impl IntoView {
    if summaries.is_empty() {
        return view! { <p class="ner-facetting__empty">"No entities found."</p> }.into_any();
    }
    view! {
        <ul class="ner-facetting__list">
            {summaries
                .into_iter()
                .map(|summary| {
                    view! {
                        <li class=tag_class(summary.kind)>
                            <span class="ner-facetting__value">{summary.value}</span>
                            <span class="ner-facetting__count">{summary.count}</span>
                        </li>
                    }
                })
                .collect_view()}
        </ul>
    }
    .into_any()
}

fn page_list(pages: Vec<PageTags>) -> impl IntoView {
    if pages.is_empty() {
        return view! { <p class="ner-facetting__empty">"No entities found."</p> }.into_any();
    }
    pages
        .into_iter()
        .map(|page| {
            let label = page.label();
            let first = page.first().map(|p| p.to_string()).unwrap_or_default();
            view! {
                <div class="ner-facetting__page" data-page=first>
                    <span class="ner-facetting__page-label">{label}</span>
                    <ul class="ner-facetting__list">
                        {page
                            .tags
                            .into_iter()
                            .map(|tag| {
                                view! {
                                    <li class=tag_class(tag.kind)>
                                        <span class="ner-facetting__value">{tag.value}</span>
                                        <span class="ner-facetting__count">{tag.counter}</span>
                                    </li>
                                }
                            })
                            .collect_view()}
                    </ul>
                </div>
            }
        })
        .collect_view()
        .into_any()
}
