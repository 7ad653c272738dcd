use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::api;
use crate::calendar::MonthRef;
use crate::filters::{income_totals, IncomeFilter, StatusFilter};
use crate::format::{format_currency, format_date};
use crate::forms::IncomeForm;
use crate::models::category::category_name;
use crate::models::{Account, Category, CategoryKind, Income};
use crate::ui::components::{
    alert, bind_check, bind_select, bind_text, check_field, confirm, empty_row, id_options,
    input_field, loading_row, page_shell, primary_button, report_error, select_field, use_api,
    use_list, FormMode, Modal, StatCard, StatIcon,
};

#[function_component(IncomePage)]
pub fn income_page() -> Html {
    let api = use_api();
    let version = use_state(|| 0u32);
    let incomes = use_list::<Income>(api::INCOMES.to_string(), *version);
    let categories = use_list::<Category>(api::CATEGORIES.to_string(), 0);
    let accounts = use_list::<Account>(api::ACCOUNTS.to_string(), 0);

    let filter = use_state(|| IncomeFilter {
        month: Some(MonthRef::today()),
        ..IncomeFilter::default()
    });
    let mode = use_state(|| FormMode::Closed);
    let form = use_state(IncomeForm::default);
    let saving = use_state(|| false);

    let accounts_list: &[Account] = accounts.as_deref().unwrap_or(&[]);
    let income_categories: Vec<Category> = categories
        .as_deref()
        .unwrap_or(&[])
        .iter()
        .filter(|c| c.kind == CategoryKind::Receita)
        .cloned()
        .collect();

    let on_new = {
        let mode = mode.clone();
        let form = form.clone();
        Callback::from(move |_: MouseEvent| {
            form.set(IncomeForm::default());
            mode.set(FormMode::Create);
        })
    };

    let on_close = {
        let mode = mode.clone();
        Callback::from(move |_: ()| mode.set(FormMode::Closed))
    };

    let on_save = {
        let api = api.clone();
        let form = form.clone();
        let mode = mode.clone();
        let saving = saving.clone();
        let version = version.clone();
        Callback::from(move |_: ()| {
            let record = match form.to_record(mode.id()) {
                Ok(record) => record,
                Err(err) => {
                    alert(&err.to_string());
                    return;
                }
            };
            let api = api.clone();
            let mode = mode.clone();
            let saving = saving.clone();
            let version = version.clone();
            saving.set(true);
            spawn_local(async move {
                match api.save::<_, Income>(api::INCOMES, record.id, &record).await {
                    Ok(_) => {
                        mode.set(FormMode::Closed);
                        version.set(*version + 1);
                    }
                    Err(err) => report_error("Não foi possível salvar a receita", &err),
                }
                saving.set(false);
            });
        })
    };

    let edit = {
        let mode = mode.clone();
        let form = form.clone();
        move |income: &Income| {
            let mode = mode.clone();
            let form = form.clone();
            let income = income.clone();
            Callback::from(move |_: MouseEvent| {
                if let Some(id) = income.id {
                    form.set(IncomeForm::from_record(&income));
                    mode.set(FormMode::Edit(id));
                }
            })
        }
    };

    let toggle_received = {
        let api = api.clone();
        let version = version.clone();
        move |income: &Income| {
            let api = api.clone();
            let version = version.clone();
            let mut updated = income.clone();
            updated.received = !updated.received;
            Callback::from(move |_: Event| {
                let Some(id) = updated.id else { return };
                let api = api.clone();
                let version = version.clone();
                let updated = updated.clone();
                spawn_local(async move {
                    match api.update::<_, Income>(api::INCOMES, id, &updated).await {
                        Ok(_) => version.set(*version + 1),
                        Err(err) => report_error("Não foi possível atualizar a receita", &err),
                    }
                });
            })
        }
    };

    let remove = {
        let api = api.clone();
        let version = version.clone();
        move |income: &Income| {
            let api = api.clone();
            let version = version.clone();
            let id = income.id;
            let description = income.description.clone();
            Callback::from(move |_: MouseEvent| {
                let Some(id) = id else { return };
                if !confirm(&format!("Excluir a receita \"{}\"?", description)) {
                    return;
                }
                let api = api.clone();
                let version = version.clone();
                spawn_local(async move {
                    match api.delete(api::INCOMES, id).await {
                        Ok(()) => version.set(*version + 1),
                        Err(err) => report_error("Não foi possível excluir a receita", &err),
                    }
                });
            })
        }
    };

    let visible = incomes.as_ref().map(|list| filter.apply(list));
    let totals = visible.as_deref().map(income_totals).unwrap_or_default();
    let id_value = |id: Option<i64>| id.map(|id| id.to_string()).unwrap_or_default();

    let status_options: Vec<(String, String)> = [
        (StatusFilter::All, "Todas"),
        (StatusFilter::Pending, "A receber"),
        (StatusFilter::Settled, "Recebidas"),
    ]
    .into_iter()
    .map(|(status, label)| (status.code().to_string(), label.to_string()))
    .collect();

    let filter_bar = html! {
        <div class="bg-card rounded-[10px] shadow-sm border border-border p-4 grid grid-cols-2 md:grid-cols-5 gap-3">
            { input_field("Mês", "month", &filter.month.map(|m| m.to_string()).unwrap_or_default(),
                bind_text(&filter, |f, v| f.month = v.parse::<MonthRef>().ok())) }
            { select_field("Categoria", &id_value(filter.category_id),
                id_options(&income_categories, "Todas as categorias", |c: &Category| (c.id, c.name.clone())),
                bind_select(&filter, |f, v| f.category_id = v.parse().ok())) }
            { select_field("Conta", &id_value(filter.account_id),
                id_options(accounts_list, "Todas as contas", |a: &Account| (a.id, a.name.clone())),
                bind_select(&filter, |f, v| f.account_id = v.parse().ok())) }
            { select_field("Situação", filter.status.code(), status_options,
                bind_select(&filter, |f, v| f.status = StatusFilter::from_code(&v))) }
            { input_field("Buscar", "search", &filter.search, bind_text(&filter, |f, v| f.search = v)) }
        </div>
    };

    let rows = match visible.as_ref() {
        None => loading_row(6),
        Some(list) if list.is_empty() => empty_row(6, "Nenhuma receita encontrada."),
        Some(list) => html! {
            { for list.iter().map(|income| html! {
                <tr class="border-t border-border">
                    <td class="p-3">{ format_date(income.date) }</td>
                    <td class="p-3 font-medium">
                        { income.description.clone() }
                        if income.recurring {
                            <span class="ml-2 text-xs text-muted-foreground">{"Mensal"}</span>
                        }
                    </td>
                    <td class="p-3">{ category_name(&income_categories, income.category_id) }</td>
                    <td class="p-3 text-right text-[#1D617A]">{ format_currency(income.amount) }</td>
                    <td class="p-3 text-center">
                        <input type="checkbox" checked={income.received} onchange={toggle_received(income)} />
                    </td>
                    <td class="p-3 text-right space-x-2">
                        <button onclick={edit(income)} class="text-primary">{"Editar"}</button>
                        <button onclick={remove(income)} class="text-red-600">{"Excluir"}</button>
                    </td>
                </tr>
            }) }
        },
    };

    page_shell(
        "Receitas",
        primary_button("Nova receita", on_new),
        html! {
            <>
                { filter_bar }
                <div class="grid grid-cols-1 md:grid-cols-3 gap-6">
                    <StatCard title="Total" amount={totals.total} icon={StatIcon::Wallet} />
                    <StatCard title="Recebidas" amount={totals.settled} icon={StatIcon::UpRight} />
                    <StatCard title="A receber" amount={totals.pending} icon={StatIcon::Calendar} />
                </div>
                <div class="bg-card rounded-[10px] shadow-sm border border-border overflow-x-auto">
                    <table class="w-full text-sm">
                        <thead class="bg-slate-50 text-left text-muted-foreground">
                            <tr>
                                <th class="p-3">{"Data"}</th>
                                <th class="p-3">{"Descrição"}</th>
                                <th class="p-3">{"Categoria"}</th>
                                <th class="p-3 text-right">{"Valor"}</th>
                                <th class="p-3 text-center">{"Recebida"}</th>
                                <th class="p-3"></th>
                            </tr>
                        </thead>
                        <tbody>{ rows }</tbody>
                    </table>
                </div>

                if mode.is_open() {
                    <Modal title={mode.title("Nova receita", "Editar receita")} on_close={on_close} on_save={on_save} saving={*saving}>
                        { input_field("Descrição", "text", &form.description, bind_text(&form, |f, v| f.description = v)) }
                        { input_field("Valor", "text", &form.amount, bind_text(&form, |f, v| f.amount = v)) }
                        { input_field("Data", "date", &form.date, bind_text(&form, |f, v| f.date = v)) }
                        { select_field("Categoria", &form.category_id,
                            id_options(&income_categories, "Sem categoria", |c: &Category| (c.id, c.name.clone())),
                            bind_select(&form, |f, v| f.category_id = v)) }
                        { select_field("Conta", &form.account_id,
                            id_options(accounts_list, "Nenhuma", |a: &Account| (a.id, a.name.clone())),
                            bind_select(&form, |f, v| f.account_id = v)) }
                        { check_field("Recebida", form.received, bind_check(&form, |f, v| f.received = v)) }
                        { check_field("Repete todo mês", form.recurring, bind_check(&form, |f, v| f.recurring = v)) }
                    </Modal>
                }
            </>
        },
    )
}
