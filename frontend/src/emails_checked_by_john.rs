use gloo_net::http::Request;
use shared::models::CheckedEmail;
use std::rc::Rc;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::config::Config;
use crate::styles::*;

#[derive(Clone, Default)]
pub struct EmailsState {
    mission_number: String,
    emails: Vec<CheckedEmail>,
    loaded_mission: Option<String>,
    error: Option<String>,
    loading: bool,
}

pub enum Msg {
    UpdateMission(String),
    Fetch,
    EmailsReceived(String, Vec<CheckedEmail>),
    Error(String),
}

impl Reducible for EmailsState {
    type Action = Msg;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            Msg::UpdateMission(value) => {
                next.mission_number = value;
            },
            Msg::Fetch => {
                next.loading = true;
                next.error = None;
            },
            Msg::EmailsReceived(mission, emails) => {
                next.emails = emails;
                next.loaded_mission = Some(mission);
                next.loading = false;
            },
            Msg::Error(error) => {
                next.emails.clear();
                next.loaded_mission = None;
                next.error = Some(error);
                next.loading = false;
            },
        }
        Rc::new(next)
    }
}

#[function_component]
pub fn EmailsCheckedByJohn() -> Html {
    let config = use_context::<Config>().expect("Config context is provided at the app root");
    let state = use_reducer(EmailsState::default);

    let oninput = {
        let state = state.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            state.dispatch(Msg::UpdateMission(input.value()));
        })
    };

    let onsubmit = {
        let state = state.clone();
        let api_base_url = config.api_base_url;
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let mission = state.mission_number.trim().to_string();
            if mission.parse::<i32>().is_err() {
                state.dispatch(Msg::Error("The mission number must be an integer.".into()));
                return;
            }
            state.dispatch(Msg::Fetch);
            let state = state.clone();
            wasm_bindgen_futures::spawn_local(async move {
                state.dispatch(fetch_checked_emails(api_base_url, mission).await);
            });
        })
    };

    html! {
        <div class={CONTAINER}>
            <h1 class={combine_classes(HEADING_LG, "text-white")}>{"Emails Checked By John"}</h1>

            <form onsubmit={onsubmit} class="flex items-end gap-4 max-w-md mx-auto mb-6">
                <div class={INPUT_GROUP}>
                    <label class={TEXT_LABEL}>{"Mission number"}</label>
                    <input type="text" class={INPUT_BASE} value={state.mission_number.clone()}
                        {oninput} placeholder="e.g. 42" />
                </div>
                <button type="submit" class={button_primary(false)} disabled={state.loading}>
                    {if state.loading { "Loading..." } else { "Show results" }}
                </button>
            </form>

            {if let Some(error) = &state.error {
                html! { <div class={alert_style("error")}>{error}</div> }
            } else { html! {} }}

            {render_results(&state)}
        </div>
    }
}

fn render_results(state: &EmailsState) -> Html {
    let Some(mission) = &state.loaded_mission else {
        return html! {};
    };

    html! {
        <>
            <p class={TEXT_MUTED}>
                {format!("{} checked emails for mission {}", state.emails.len(), mission)}
            </p>
            <div class={TABLE_WRAP}>
                <table class={TABLE}>
                    <thead>
                        <tr>
                            <th class={TABLE_HEADER}>{"Contact"}</th>
                            <th class={TABLE_HEADER}>{"Email"}</th>
                            <th class={TABLE_HEADER}>{"Result"}</th>
                            <th class={TABLE_HEADER}>{"Reason"}</th>
                            <th class={TABLE_HEADER}>{"Safe to send"}</th>
                            <th class={TABLE_HEADER}>{"Checked at"}</th>
                        </tr>
                    </thead>
                    <tbody class="divide-y divide-gray-700">
                        {state.emails.iter().map(render_row).collect::<Html>()}
                    </tbody>
                </table>
            </div>
        </>
    }
}

fn render_row(email: &CheckedEmail) -> Html {
    let contact = email.full_name();

    html! {
        <tr>
            <td class={TABLE_CELL}>{if contact.is_empty() { "-".to_string() } else { contact }}</td>
            <td class={TABLE_CELL}>{email.email.clone()}</td>
            <td class={TABLE_CELL}>{render_text(&email.qev_result)}</td>
            <td class={TABLE_CELL}>{render_text(&email.qev_reason)}</td>
            <td class={TABLE_CELL}>{match email.qev_safe_to_send {
                Some(true) => "yes",
                Some(false) => "no",
                None => "-",
            }}</td>
            <td class={TABLE_CELL}>{render_datetime(&email.api_check_datetime)}</td>
        </tr>
    }
}

fn render_text(value: &Option<String>) -> String {
    value.clone().unwrap_or_else(|| "-".into())
}

fn render_datetime(value: &Option<OffsetDateTime>) -> String {
    value
        .as_ref()
        .and_then(|t| t.format(&Rfc3339).ok())
        .unwrap_or_else(|| "-".into())
}

async fn fetch_checked_emails(api_base_url: &str, mission: String) -> Msg {
    let url = format!("{}/get-emails-checked-by-john/mission-number/{}", api_base_url, mission);

    let response = match Request::get(&url).send().await {
        Ok(response) => response,
        Err(e) => return Msg::Error(e.to_string()),
    };

    match response.status() {
        200 => match response.json::<Vec<CheckedEmail>>().await {
            Ok(emails) => Msg::EmailsReceived(mission, emails),
            Err(e) => Msg::Error(e.to_string()),
        },
        404 => Msg::Error(format!("No checked emails found for mission {}.", mission)),
        _ => Msg::Error("An unexpected error occurred.".into()),
    }
}
