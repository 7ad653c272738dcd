use serde::de::DeserializeOwned;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::api::ApiClient;
use crate::config::{AppSettings, DEFAULT_API_BASE_URL};
use crate::errors::AppError;
use crate::format::format_currency;

/// Whether a page's modal is closed, creating, or editing a record.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum FormMode {
    Closed,
    Create,
    Edit(i64),
}

impl FormMode {
    pub fn is_open(&self) -> bool {
        !matches!(self, FormMode::Closed)
    }

    pub fn id(&self) -> Option<i64> {
        match self {
            FormMode::Edit(id) => Some(*id),
            _ => None,
        }
    }

    pub fn title(&self, create: &str, edit: &str) -> String {
        match self {
            FormMode::Edit(_) => edit.to_string(),
            _ => create.to_string(),
        }
    }
}

pub fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}

pub fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

/// Logs the failure and blocks on an alert dialog, the only recovery offered.
pub fn report_error(context: &str, err: &AppError) {
    tracing::error!(error = %err, "{}", context);
    alert(&format!("{}\n\n{}", context, err));
}

#[hook]
pub fn use_api() -> ApiClient {
    let settings = use_context::<UseStateHandle<AppSettings>>();
    settings
        .map(|s| ApiClient::from_settings(&s))
        .unwrap_or_else(|| ApiClient::new(DEFAULT_API_BASE_URL))
}

/// Fetches `path` on mount and whenever `path` or `version` changes. `None`
/// while the first response is pending; an empty path yields an empty list.
#[hook]
pub fn use_list<T>(path: String, version: u32) -> UseStateHandle<Option<Vec<T>>>
where
    T: DeserializeOwned + 'static,
{
    let api = use_api();
    let items = use_state(|| None::<Vec<T>>);
    {
        let items = items.clone();
        use_effect_with_deps(
            move |(path, _)| {
                let path = path.clone();
                if path.is_empty() {
                    items.set(Some(Vec::new()));
                } else {
                    spawn_local(async move {
                        match api.list::<T>(&path).await {
                            Ok(list) => {
                                tracing::debug!(path = %path, count = list.len(), "list loaded");
                                items.set(Some(list));
                            }
                            Err(err) => {
                                report_error("Não foi possível carregar os dados", &err);
                                items.set(Some(Vec::new()));
                            }
                        }
                    });
                }
                || ()
            },
            (path, version),
        );
    }
    items
}

pub fn bind_text<F>(form: &UseStateHandle<F>, apply: fn(&mut F, String)) -> Callback<InputEvent>
where
    F: Clone + 'static,
{
    let form = form.clone();
    Callback::from(move |e: InputEvent| {
        if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
            let mut next = (*form).clone();
            apply(&mut next, input.value());
            form.set(next);
        }
    })
}

pub fn bind_select<F>(form: &UseStateHandle<F>, apply: fn(&mut F, String)) -> Callback<Event>
where
    F: Clone + 'static,
{
    let form = form.clone();
    Callback::from(move |e: Event| {
        if let Some(select) = e.target_dyn_into::<HtmlSelectElement>() {
            let mut next = (*form).clone();
            apply(&mut next, select.value());
            form.set(next);
        }
    })
}

pub fn bind_check<F>(form: &UseStateHandle<F>, apply: fn(&mut F, bool)) -> Callback<Event>
where
    F: Clone + 'static,
{
    let form = form.clone();
    Callback::from(move |e: Event| {
        if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
            let mut next = (*form).clone();
            apply(&mut next, input.checked());
            form.set(next);
        }
    })
}

pub fn input_field(
    label: &'static str,
    input_type: &'static str,
    value: &str,
    oninput: Callback<InputEvent>,
) -> Html {
    html! {
        <label class="flex flex-col gap-1 text-sm">
            <span class="text-muted-foreground">{ label }</span>
            <input type={input_type} value={value.to_string()} {oninput} class="p-2 border rounded" />
        </label>
    }
}

pub fn select_field(
    label: &'static str,
    value: &str,
    options: Vec<(String, String)>,
    onchange: Callback<Event>,
) -> Html {
    html! {
        <label class="flex flex-col gap-1 text-sm">
            <span class="text-muted-foreground">{ label }</span>
            <select {onchange} class="p-2 border rounded bg-white">
                { for options.into_iter().map(|(code, text)| {
                    let selected = code == value;
                    html! { <option value={code} {selected}>{ text }</option> }
                }) }
            </select>
        </label>
    }
}

pub fn check_field(label: &'static str, checked: bool, onchange: Callback<Event>) -> Html {
    html! {
        <label class="flex items-center gap-2 text-sm">
            <input type="checkbox" {checked} {onchange} />
            <span>{ label }</span>
        </label>
    }
}

/// `(id, name)` pairs for a select, led by an empty "none" option.
pub fn id_options<T>(items: &[T], none_label: &str, item: impl Fn(&T) -> (Option<i64>, String)) -> Vec<(String, String)> {
    let mut options = vec![(String::new(), none_label.to_string())];
    options.extend(items.iter().filter_map(|it| {
        let (id, name) = item(it);
        id.map(|id| (id.to_string(), name))
    }));
    options
}

pub fn page_shell(title: &'static str, actions: Html, children: Html) -> Html {
    html! {
        <div class="p-6 max-w-7xl mx-auto">
            <div class="flex items-center justify-between pb-4 border-b border-border">
                <h1 class="text-2xl font-bold text-foreground">{ title }</h1>
                { actions }
            </div>
            <div class="pt-5 space-y-6">
                { children }
            </div>
        </div>
    }
}

pub fn primary_button(label: &'static str, onclick: Callback<MouseEvent>) -> Html {
    html! {
        <button {onclick} class="flex items-center gap-2 bg-primary text-primary-foreground px-4 py-2 rounded-xl font-bold text-sm hover:opacity-90 transition-all">
            { icon_plus() }
            { label }
        </button>
    }
}

pub fn loading_row(colspan: usize) -> Html {
    html! {
        <tr><td colspan={colspan.to_string()} class="p-4 text-center text-muted-foreground">{"Carregando..."}</td></tr>
    }
}

pub fn empty_row(colspan: usize, text: &'static str) -> Html {
    html! {
        <tr><td colspan={colspan.to_string()} class="p-4 text-center text-muted-foreground">{ text }</td></tr>
    }
}

#[derive(Properties, PartialEq)]
pub struct ModalProps {
    pub title: String,
    pub children: Children,
    pub on_close: Callback<()>,
    pub on_save: Callback<()>,
    #[prop_or_default]
    pub saving: bool,
}

#[function_component(Modal)]
pub fn modal(props: &ModalProps) -> Html {
    let on_close = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };
    let on_save = {
        let on_save = props.on_save.clone();
        Callback::from(move |_: MouseEvent| on_save.emit(()))
    };

    html! {
        <div class="fixed inset-0 bg-black/40 flex items-center justify-center z-50">
            <div class="bg-white rounded-xl shadow-lg w-full max-w-2xl max-h-[90vh] overflow-y-auto">
                <div class="px-6 py-4 border-b border-border flex items-center justify-between">
                    <h3 class="text-lg font-bold text-[#173E63]">{ props.title.clone() }</h3>
                    <button onclick={on_close.clone()} class="text-slate-400 hover:text-slate-600">{"✕"}</button>
                </div>
                <div class="p-6 grid grid-cols-1 md:grid-cols-2 gap-3">
                    { for props.children.iter() }
                </div>
                <div class="px-6 py-4 border-t border-border flex justify-end gap-2">
                    <button onclick={on_close} class="px-4 py-2 rounded border">{"Cancelar"}</button>
                    <button onclick={on_save} disabled={props.saving} class="bg-accent text-white px-4 py-2 rounded">
                        { if props.saving { "Salvando..." } else { "Salvar" } }
                    </button>
                </div>
            </div>
        </div>
    }
}

#[derive(Clone, Copy, PartialEq)]
pub enum StatIcon {
    UpRight,
    CreditCard,
    Wallet,
    Calendar,
}

#[derive(Properties, PartialEq)]
pub struct StatCardProps {
    pub title: &'static str,
    pub amount: f64,
    pub icon: StatIcon,
}

#[function_component(StatCard)]
pub fn stat_card(props: &StatCardProps) -> Html {
    let tone = if props.amount < 0.0 {
        "text-2xl font-bold text-red-600 tracking-tight"
    } else {
        "text-2xl font-bold text-[#1D617A] tracking-tight"
    };
    html! {
        <div class="bg-card p-6 rounded-[10px] shadow-sm border border-border flex justify-between items-start">
            <div>
                <p class="text-muted-foreground text-[10px] font-bold mb-1 tracking-widest">{ props.title }</p>
                <h3 class={tone}>{ format_currency(props.amount) }</h3>
            </div>
            <div class="p-3 bg-[#eef4f9] rounded-[10px]">
                {
                    match props.icon {
                        StatIcon::UpRight => icon_arrow_up_right(),
                        StatIcon::CreditCard => icon_credit_card(),
                        StatIcon::Wallet => icon_wallet(),
                        StatIcon::Calendar => icon_calendar(),
                    }
                }
            </div>
        </div>
    }
}

fn icon_base(path: &'static str) -> Html {
    html! {
        <svg width="20" height="20" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round" class="text-foreground">
            <path d={path}></path>
        </svg>
    }
}

pub fn icon_layout_grid() -> Html {
    icon_base("M3 3h8v8H3zM13 3h8v8h-8zM3 13h8v8H3zM13 13h8v8h-8z")
}
pub fn icon_bank() -> Html {
    icon_base("M3 10h18M5 10v8M9 10v8M15 10v8M19 10v8M2 20h20M12 3l9 5H3z")
}
pub fn icon_wallet() -> Html {
    icon_base("M3 7h18v10H3zM16 7V5H5v2")
}
pub fn icon_trending_up() -> Html {
    icon_base("M3 17l6-6 4 4 7-7")
}
pub fn icon_trending_down() -> Html {
    icon_base("M3 7l6 6 4-4 7 7")
}
pub fn icon_credit_card() -> Html {
    icon_base("M3 7h18v10H3zM3 11h18")
}
pub fn icon_tag() -> Html {
    icon_base("M20 12l-8 8-9-9V3h8zM7 7h.01")
}
pub fn icon_car() -> Html {
    icon_base("M5 17h14M3 13l2-6h14l2 6v4H3zM7 17v2M17 17v2")
}
pub fn icon_calendar() -> Html {
    icon_base("M3 5h18v16H3zM16 3v4M8 3v4M3 10h18")
}
pub fn icon_bar_chart() -> Html {
    icon_base("M4 20V10M10 20V4M16 20v-6M22 20H2")
}
pub fn icon_settings() -> Html {
    icon_base("M12 1v3M12 20v3M4.2 4.2l2.1 2.1M17.7 17.7l2.1 2.1M1 12h3M20 12h3M4.2 19.8l2.1-2.1M17.7 6.3l2.1-2.1")
}
pub fn icon_plus() -> Html {
    icon_base("M12 5v14M5 12h14")
}
pub fn icon_arrow_up_right() -> Html {
    icon_base("M7 17L17 7M7 7h10v10")
}
