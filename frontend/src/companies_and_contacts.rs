use gloo_net::http::{Request, Response};
use shared::models::{
    CompanyContactRow, CountryRow, IndustryRow, JobFunctionRow, JobLevelRow, SearchCriteria,
    SearchStep, SizeRow, TypeRow,
};
use shared::validation::{
    normalize_search_criteria, validate_search_criteria, TRI_STATE_ANY, TRI_STATE_WITH,
    TRI_STATE_WITHOUT,
};
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::{config::Config, styles::*};

#[derive(Clone, Copy, PartialEq)]
pub enum ListKind {
    Countries,
    CompanyIndustries,
    CompanySizes,
    CompanyTypes,
    ContactIndustries,
    JobFunctions,
    JobLevels,
}

impl ListKind {
    const ALL: [ListKind; 7] = [
        ListKind::Countries,
        ListKind::CompanyIndustries,
        ListKind::CompanySizes,
        ListKind::CompanyTypes,
        ListKind::ContactIndustries,
        ListKind::JobFunctions,
        ListKind::JobLevels,
    ];

    fn path(self) -> &'static str {
        match self {
            ListKind::Countries => "/get-countries-list",
            ListKind::CompanyIndustries => "/get-companies-industries-list",
            ListKind::CompanySizes => "/get-companies-sizes-list",
            ListKind::CompanyTypes => "/get-companies-types-list",
            ListKind::ContactIndustries => "/get-contacts-industries-list",
            ListKind::JobFunctions => "/get-contacts-functions-list",
            ListKind::JobLevels => "/get-contacts-levels-list",
        }
    }

    fn label(self) -> &'static str {
        match self {
            ListKind::Countries => "countries",
            ListKind::CompanyIndustries => "company industries",
            ListKind::CompanySizes => "company sizes",
            ListKind::CompanyTypes => "company types",
            ListKind::ContactIndustries => "contact industries",
            ListKind::JobFunctions => "job functions",
            ListKind::JobLevels => "job levels",
        }
    }
}

#[derive(Clone, Copy, PartialEq)]
pub enum CriteriaGroup {
    CompanyCountries,
    CompanyIndustries,
    CompanySizes,
    CompanyTypes,
    ContactCountries,
    ContactIndustries,
    ContactFunctions,
    ContactJobLevels,
}

#[derive(Clone, Default)]
struct Lists {
    countries: Vec<String>,
    company_industries: Vec<String>,
    company_sizes: Vec<String>,
    company_types: Vec<String>,
    contact_industries: Vec<String>,
    job_functions: Vec<String>,
    job_levels: Vec<String>,
}

impl Lists {
    fn slot_mut(&mut self, kind: ListKind) -> &mut Vec<String> {
        match kind {
            ListKind::Countries => &mut self.countries,
            ListKind::CompanyIndustries => &mut self.company_industries,
            ListKind::CompanySizes => &mut self.company_sizes,
            ListKind::CompanyTypes => &mut self.company_types,
            ListKind::ContactIndustries => &mut self.contact_industries,
            ListKind::JobFunctions => &mut self.job_functions,
            ListKind::JobLevels => &mut self.job_levels,
        }
    }
}

#[derive(Default)]
pub struct FormState {
    criteria: SearchCriteria,
    company_domains_input: String,
    excluded_company_domains_input: String,
    remote_accounts_input: String,
    excluded_remote_accounts_input: String,
    lists: Lists,
    count: Option<i64>,
    rows: Vec<CompanyContactRow>,
    notice: Option<String>,
    error: Option<String>,
    searching: bool,
}

pub enum SearchReply {
    Rows(Vec<CompanyContactRow>),
    SentByEmail,
}

pub enum Msg {
    ListLoaded(ListKind, Vec<String>),
    ListError(String),
    UpdateField(&'static str, String),
    UpdateTriState(&'static str, i32),
    Toggle(CriteriaGroup, String),
    Count,
    Search,
    CountReceived(Result<i64, String>),
    SearchReceived(Result<SearchReply, String>),
}

pub struct CompaniesAndContacts {
    state: FormState,
    api_base_url: &'static str,
}

impl Component for CompaniesAndContacts {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let (config, _) = ctx
            .link()
            .context::<Config>(Callback::noop())
            .expect("Config context is provided at the app root");
        let api_base_url = config.api_base_url;

        for kind in ListKind::ALL {
            ctx.link().send_future(async move { fetch_list(api_base_url, kind).await });
        }

        Self {
            state: FormState::default(),
            api_base_url,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::ListLoaded(kind, names) => {
                *self.state.lists.slot_mut(kind) = names;
                true
            },
            Msg::ListError(error) => {
                self.state.error = Some(error);
                true
            },
            Msg::UpdateField(field, value) => {
                match field {
                    "company_city" => self.state.criteria.company_city = value,
                    "company_post_code" => self.state.criteria.company_post_code = value,
                    "contact_city" => self.state.criteria.contact_city = value,
                    "contact_post_code" => self.state.criteria.contact_post_code = value,
                    "contact_job_title" => self.state.criteria.contact_job_title = value,
                    "company_domains" => self.state.company_domains_input = value,
                    "excluded_company_domains" => self.state.excluded_company_domains_input = value,
                    "contact_remote_accounts" => self.state.remote_accounts_input = value,
                    "excluded_contact_remote_accounts" => {
                        self.state.excluded_remote_accounts_input = value
                    }
                    _ => return false,
                }
                true
            },
            Msg::UpdateTriState(field, value) => {
                match field {
                    "company_has_email" => self.state.criteria.company_has_email = value,
                    "company_has_phone" => self.state.criteria.company_has_phone = value,
                    "contact_has_email" => self.state.criteria.contact_has_email = value,
                    _ => return false,
                }
                true
            },
            Msg::Toggle(group, name) => {
                let selected = self.selected_mut(group);
                if let Some(pos) = selected.iter().position(|v| v == &name) {
                    selected.remove(pos);
                } else {
                    selected.push(name);
                }
                true
            },
            Msg::Count => self.submit(ctx, SearchStep::Count),
            Msg::Search => self.submit(ctx, SearchStep::Full),
            Msg::CountReceived(result) => {
                self.state.searching = false;
                match result {
                    Ok(count) => self.state.count = Some(count),
                    Err(error) => self.state.error = Some(error),
                }
                true
            },
            Msg::SearchReceived(result) => {
                self.state.searching = false;
                match result {
                    Ok(SearchReply::Rows(rows)) => self.state.rows = rows,
                    Ok(SearchReply::SentByEmail) => {
                        self.state.notice = Some(
                            "The request returned too many lines so results have been sent by email."
                                .into(),
                        );
                    }
                    Err(error) => self.state.error = Some(error),
                }
                true
            },
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        html! {
            <div class={CONTAINER_WIDE}>
                <h1 class={combine_classes(HEADING_LG, "text-white")}>{"Companies & Contacts"}</h1>

                {if let Some(error) = &self.state.error {
                    html! { <div class={alert_style("error")}>{error}</div> }
                } else { html! {} }}
                {if let Some(notice) = &self.state.notice {
                    html! { <div class={alert_style("success")}>{notice}</div> }
                } else { html! {} }}

                {self.render_form(ctx)}
                {self.render_count()}
                {self.render_results()}
            </div>
        }
    }
}

impl CompaniesAndContacts {
    fn selected_mut(&mut self, group: CriteriaGroup) -> &mut Vec<String> {
        match group {
            CriteriaGroup::CompanyCountries => &mut self.state.criteria.company_countries,
            CriteriaGroup::CompanyIndustries => &mut self.state.criteria.company_industries,
            CriteriaGroup::CompanySizes => &mut self.state.criteria.company_sizes,
            CriteriaGroup::CompanyTypes => &mut self.state.criteria.company_types,
            CriteriaGroup::ContactCountries => &mut self.state.criteria.contact_countries,
            CriteriaGroup::ContactIndustries => &mut self.state.criteria.contact_industries,
            CriteriaGroup::ContactFunctions => &mut self.state.criteria.contact_functions,
            CriteriaGroup::ContactJobLevels => &mut self.state.criteria.contact_job_levels,
        }
    }

    fn assemble_criteria(&self, step: SearchStep) -> SearchCriteria {
        let mut criteria = self.state.criteria.clone();
        criteria.step = step;
        criteria.company_domains = split_csv(&self.state.company_domains_input);
        criteria.excluded_company_domains = split_csv(&self.state.excluded_company_domains_input);
        criteria.contact_remote_accounts = split_csv(&self.state.remote_accounts_input);
        criteria.excluded_contact_remote_accounts =
            split_csv(&self.state.excluded_remote_accounts_input);
        criteria
    }

    fn submit(&mut self, ctx: &Context<Self>, step: SearchStep) -> bool {
        let mut criteria = self.assemble_criteria(step);
        if let Err(error) = validate_search_criteria(&criteria) {
            self.state.error = Some(error.to_string());
            return true;
        }
        normalize_search_criteria(&mut criteria);

        self.state.searching = true;
        self.state.error = None;
        self.state.notice = None;
        self.state.count = None;
        self.state.rows.clear();

        let api_base_url = self.api_base_url;
        match step {
            SearchStep::Count => ctx.link().send_future(async move {
                Msg::CountReceived(run_count(api_base_url, criteria).await)
            }),
            SearchStep::Full => ctx.link().send_future(async move {
                Msg::SearchReceived(run_search(api_base_url, criteria).await)
            }),
        }
        true
    }

    fn render_form(&self, ctx: &Context<Self>) -> Html {
        let onsubmit = ctx.link().callback(|e: SubmitEvent| {
            e.prevent_default();
            Msg::Search
        });
        let oncount = ctx.link().callback(|_: MouseEvent| Msg::Count);

        html! {
            <form {onsubmit} class={SPACE_Y_LG}>
                <div class="grid gap-8 md:grid-cols-2">
                    <div class={SPACE_Y_BASE}>
                        <h2 class={HEADING_SM}>{"Company"}</h2>
                        {self.render_text_input(ctx, "company_city", "City")}
                        {self.render_text_input(ctx, "company_post_code", "Post code")}
                        {self.render_checkbox_group(ctx, CriteriaGroup::CompanyCountries, "Countries",
                            &self.state.lists.countries, &self.state.criteria.company_countries)}
                        {self.render_checkbox_group(ctx, CriteriaGroup::CompanyIndustries, "Industries",
                            &self.state.lists.company_industries, &self.state.criteria.company_industries)}
                        {self.render_checkbox_group(ctx, CriteriaGroup::CompanySizes, "Sizes",
                            &self.state.lists.company_sizes, &self.state.criteria.company_sizes)}
                        {self.render_checkbox_group(ctx, CriteriaGroup::CompanyTypes, "Types",
                            &self.state.lists.company_types, &self.state.criteria.company_types)}
                        <div class="grid grid-cols-2 gap-4">
                            {self.render_tri_state(ctx, "company_has_email", "Has email",
                                self.state.criteria.company_has_email)}
                            {self.render_tri_state(ctx, "company_has_phone", "Has phone",
                                self.state.criteria.company_has_phone)}
                        </div>
                        {self.render_text_input(ctx, "company_domains", "Domains (comma separated)")}
                        {self.render_text_input(ctx, "excluded_company_domains", "Excluded domains (comma separated)")}
                    </div>

                    <div class={SPACE_Y_BASE}>
                        <h2 class={HEADING_SM}>{"Contact"}</h2>
                        {self.render_text_input(ctx, "contact_city", "City")}
                        {self.render_text_input(ctx, "contact_post_code", "Post code")}
                        {self.render_checkbox_group(ctx, CriteriaGroup::ContactCountries, "Countries",
                            &self.state.lists.countries, &self.state.criteria.contact_countries)}
                        {self.render_checkbox_group(ctx, CriteriaGroup::ContactIndustries, "Industries",
                            &self.state.lists.contact_industries, &self.state.criteria.contact_industries)}
                        {self.render_text_input(ctx, "contact_job_title", "Job title")}
                        {self.render_checkbox_group(ctx, CriteriaGroup::ContactFunctions, "Job functions",
                            &self.state.lists.job_functions, &self.state.criteria.contact_functions)}
                        {self.render_checkbox_group(ctx, CriteriaGroup::ContactJobLevels, "Job levels",
                            &self.state.lists.job_levels, &self.state.criteria.contact_job_levels)}
                        <div class="grid grid-cols-2 gap-4">
                            {self.render_tri_state(ctx, "contact_has_email", "Has email",
                                self.state.criteria.contact_has_email)}
                        </div>
                        {self.render_text_input(ctx, "contact_remote_accounts", "Remote account ids (comma separated)")}
                        {self.render_text_input(ctx, "excluded_contact_remote_accounts", "Excluded remote account ids (comma separated)")}
                    </div>
                </div>

                <div class="flex justify-center gap-4">
                    <button type="button" class={combine_classes(BUTTON_BASE, BUTTON_SUCCESS)}
                        onclick={oncount} disabled={self.state.searching}>
                        {"Count results"}
                    </button>
                    <button type="submit" class={button_primary(false)} disabled={self.state.searching}>
                        {if self.state.searching { "Searching..." } else { "Search" }}
                    </button>
                </div>
            </form>
        }
    }

    fn render_text_input(&self, ctx: &Context<Self>, field: &'static str, label: &str) -> Html {
        let value = self.field_value(field).to_string();
        let oninput = ctx.link().callback(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            Msg::UpdateField(field, input.value())
        });

        html! {
            <div>
                <label class={TEXT_LABEL_SM}>{label}</label>
                <input type="text" class={INPUT_BASE} value={value} {oninput} />
            </div>
        }
    }

    fn field_value(&self, field: &str) -> &str {
        match field {
            "company_city" => &self.state.criteria.company_city,
            "company_post_code" => &self.state.criteria.company_post_code,
            "contact_city" => &self.state.criteria.contact_city,
            "contact_post_code" => &self.state.criteria.contact_post_code,
            "contact_job_title" => &self.state.criteria.contact_job_title,
            "company_domains" => &self.state.company_domains_input,
            "excluded_company_domains" => &self.state.excluded_company_domains_input,
            "contact_remote_accounts" => &self.state.remote_accounts_input,
            "excluded_contact_remote_accounts" => &self.state.excluded_remote_accounts_input,
            _ => "",
        }
    }

    fn render_tri_state(&self, ctx: &Context<Self>, field: &'static str, label: &str, value: i32) -> Html {
        let onchange = ctx.link().callback(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            Msg::UpdateTriState(field, select.value().parse().unwrap_or(TRI_STATE_ANY))
        });

        html! {
            <div>
                <label class={TEXT_LABEL_SM}>{label}</label>
                <select class={INPUT_BASE} onchange={onchange}>
                    <option value={TRI_STATE_ANY.to_string()} selected={value == TRI_STATE_ANY}>{"Any"}</option>
                    <option value={TRI_STATE_WITH.to_string()} selected={value == TRI_STATE_WITH}>{"With"}</option>
                    <option value={TRI_STATE_WITHOUT.to_string()} selected={value == TRI_STATE_WITHOUT}>{"Without"}</option>
                </select>
            </div>
        }
    }

    fn render_checkbox_group(
        &self,
        ctx: &Context<Self>,
        group: CriteriaGroup,
        label: &str,
        names: &[String],
        selected: &[String],
    ) -> Html {
        html! {
            <div>
                <div class={FLEX_BETWEEN}>
                    <label class={TEXT_LABEL_SM}>{label}</label>
                    <span class={TEXT_MUTED}>{format!("{} selected", selected.len())}</span>
                </div>
                <div class={CHECKBOX_GROUP}>
                    {for names.iter().map(|name| {
                        let checked = selected.contains(name);
                        let onchange = {
                            let name = name.clone();
                            ctx.link().callback(move |_: Event| Msg::Toggle(group, name.clone()))
                        };
                        html! {
                            <label class={CHECKBOX_LABEL}>
                                <input type="checkbox" {checked} {onchange} />
                                {name.clone()}
                            </label>
                        }
                    })}
                    {if names.is_empty() {
                        html! { <span class={TEXT_MUTED}>{"No entries."}</span> }
                    } else { html! {} }}
                </div>
            </div>
        }
    }

    fn render_count(&self) -> Html {
        match self.state.count {
            Some(count) => html! {
                <div class={alert_style("info")}>
                    {format!("{} rows match the current criteria.", count)}
                </div>
            },
            None => html! {},
        }
    }

    fn render_results(&self) -> Html {
        if self.state.rows.is_empty() {
            return html! {};
        }

        html! {
            <>
                <p class={combine_classes(TEXT_MUTED, "mt-6")}>
                    {format!("{} rows", self.state.rows.len())}
                </p>
                <div class={TABLE_WRAP}>
                    <table class={TABLE}>
                        <thead>
                            <tr>
                                <th class={TABLE_HEADER}>{"Company"}</th>
                                <th class={TABLE_HEADER}>{"Domain"}</th>
                                <th class={TABLE_HEADER}>{"Country"}</th>
                                <th class={TABLE_HEADER}>{"Industry"}</th>
                                <th class={TABLE_HEADER}>{"Contact"}</th>
                                <th class={TABLE_HEADER}>{"Job title"}</th>
                                <th class={TABLE_HEADER}>{"Contact email"}</th>
                                <th class={TABLE_HEADER}>{"Company email"}</th>
                            </tr>
                        </thead>
                        <tbody class="divide-y divide-gray-700">
                            {for self.state.rows.iter().map(render_result_row)}
                        </tbody>
                    </table>
                </div>
            </>
        }
    }
}

fn render_result_row(row: &CompanyContactRow) -> Html {
    let contact = format!("{} {}", cell(&row.cont_first_name), cell(&row.cont_last_name));

    html! {
        <tr>
            <td class={TABLE_CELL}>{cell(&row.comp_name)}</td>
            <td class={TABLE_CELL}>{cell(&row.comp_domain)}</td>
            <td class={TABLE_CELL}>{cell(&row.comp_country)}</td>
            <td class={TABLE_CELL}>{cell(&row.comp_industry)}</td>
            <td class={TABLE_CELL}>{contact.trim().to_string()}</td>
            <td class={TABLE_CELL}>{cell(&row.cont_job_title)}</td>
            <td class={TABLE_CELL}>{cell(&row.cont_email)}</td>
            <td class={TABLE_CELL}>{cell(&row.comp_email)}</td>
        </tr>
    }
}

// Aggregated columns join their distinct values with '¤'.
fn cell(value: &Option<String>) -> String {
    value.clone().unwrap_or_default().replace('¤', ", ")
}

fn split_csv(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .collect()
}

async fn fetch_list(api_base_url: &str, kind: ListKind) -> Msg {
    let response = match Request::get(&format!("{}{}", api_base_url, kind.path())).send().await {
        Ok(response) => response,
        Err(e) => return Msg::ListError(e.to_string()),
    };

    match response.status() {
        200 => match decode_names(kind, response).await {
            Ok(names) => Msg::ListLoaded(kind, names),
            Err(e) => Msg::ListError(e.to_string()),
        },
        // An empty lookup table answers 404; the form shows an empty group.
        404 => Msg::ListLoaded(kind, Vec::new()),
        _ => Msg::ListError(format!("Could not load the {} list.", kind.label())),
    }
}

async fn decode_names(kind: ListKind, response: Response) -> Result<Vec<String>, gloo_net::Error> {
    let names = match kind {
        ListKind::Countries => response
            .json::<Vec<CountryRow>>()
            .await?
            .into_iter()
            .map(|row| row.country_name)
            .collect(),
        ListKind::CompanyIndustries | ListKind::ContactIndustries => response
            .json::<Vec<IndustryRow>>()
            .await?
            .into_iter()
            .map(|row| row.industry_name)
            .collect(),
        ListKind::CompanySizes => response
            .json::<Vec<SizeRow>>()
            .await?
            .into_iter()
            .map(|row| row.size_name)
            .collect(),
        ListKind::CompanyTypes => response
            .json::<Vec<TypeRow>>()
            .await?
            .into_iter()
            .map(|row| row.type_name)
            .collect(),
        ListKind::JobFunctions => response
            .json::<Vec<JobFunctionRow>>()
            .await?
            .into_iter()
            .map(|row| row.function_name)
            .collect(),
        ListKind::JobLevels => response
            .json::<Vec<JobLevelRow>>()
            .await?
            .into_iter()
            .map(|row| row.level_name)
            .collect(),
    };
    Ok(names)
}

async fn run_count(api_base_url: &str, criteria: SearchCriteria) -> Result<i64, String> {
    let response = Request::post(&format!("{}/get-companies-and-contacts", api_base_url))
        .json(&criteria)
        .map_err(|e| e.to_string())?
        .send()
        .await
        .map_err(|e| e.to_string())?;

    match response.status() {
        200 => response.json::<i64>().await.map_err(|e| e.to_string()),
        400 => Err(read_error_text(response, "Invalid search criteria.").await),
        _ => Err("An unexpected error occurred.".into()),
    }
}

async fn run_search(api_base_url: &str, criteria: SearchCriteria) -> Result<SearchReply, String> {
    let response = Request::post(&format!("{}/get-companies-and-contacts", api_base_url))
        .json(&criteria)
        .map_err(|e| e.to_string())?
        .send()
        .await
        .map_err(|e| e.to_string())?;

    match response.status() {
        200 => response
            .json::<Vec<CompanyContactRow>>()
            .await
            .map(SearchReply::Rows)
            .map_err(|e| e.to_string()),
        204 => Ok(SearchReply::SentByEmail),
        404 => Err(read_error_text(response, "No result found.").await),
        400 => Err(read_error_text(response, "Invalid search criteria.").await),
        _ => Err("An unexpected error occurred.".into()),
    }
}

async fn read_error_text(response: Response, fallback: &str) -> String {
    match response.text().await {
        Ok(text) if !text.is_empty() => text,
        _ => fallback.to_string(),
    }
}
