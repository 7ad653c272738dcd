use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::api;
use crate::calendar::MonthRef;
use crate::filters::{expense_totals, ExpenseFilter, StatusFilter};
use crate::format::{format_currency, format_date, format_percent, parse_date};
use crate::forms::ExpenseForm;
use crate::models::category::category_name;
use crate::models::{Account, Category, CategoryKind, CreditCard, Expense, ExpenseKind};
use crate::schedule::{invoice_label, open_installments};
use crate::ui::components::{
    alert, bind_check, bind_select, bind_text, check_field, confirm, empty_row, id_options,
    input_field, loading_row, page_shell, primary_button, report_error, select_field, use_api,
    use_list, FormMode, Modal, StatCard, StatIcon,
};
use crate::validation::parse_optional_id;

pub(super) fn frequency_options() -> Vec<(String, String)> {
    [
        ("mensal", "Mensal"),
        ("bimestral", "Bimestral"),
        ("trimestral", "Trimestral"),
        ("semestral", "Semestral"),
        ("anual", "Anual"),
        ("semanal", "Semanal"),
        ("quinzenal", "Quinzenal"),
    ]
    .into_iter()
    .map(|(code, label)| (code.to_string(), label.to_string()))
    .collect()
}

pub(super) fn weekday_options() -> Vec<(String, String)> {
    [
        ("", "Mesmo dia do início"),
        ("0", "Domingo"),
        ("1", "Segunda-feira"),
        ("2", "Terça-feira"),
        ("3", "Quarta-feira"),
        ("4", "Quinta-feira"),
        ("5", "Sexta-feira"),
        ("6", "Sábado"),
    ]
    .into_iter()
    .map(|(code, label)| (code.to_string(), label.to_string()))
    .collect()
}

fn kind_options(with_all: bool) -> Vec<(String, String)> {
    let mut options = Vec::new();
    if with_all {
        options.push((String::new(), "Todos os tipos".to_string()));
    }
    options.extend(
        ExpenseKind::ALL
            .iter()
            .map(|k| (k.code().to_string(), k.label().to_string())),
    );
    options
}

fn status_options() -> Vec<(String, String)> {
    [
        (StatusFilter::All, "Todas"),
        (StatusFilter::Pending, "Pendentes"),
        (StatusFilter::Settled, "Pagas"),
    ]
    .into_iter()
    .map(|(status, label)| (status.code().to_string(), label.to_string()))
    .collect()
}

fn card_name(cards: &[CreditCard], id: Option<i64>) -> Option<String> {
    id.and_then(|id| cards.iter().find(|c| c.id == Some(id)))
        .map(|c| c.name.clone())
}

/// Kind-specific part of the expense modal.
fn kind_fields(form: &UseStateHandle<ExpenseForm>, cards: &[CreditCard]) -> Html {
    match form.kind() {
        ExpenseKind::Avulsa => html! {},
        ExpenseKind::Recorrente => {
            let frequency = form.recurrence.frequency.as_str();
            let has_interval = matches!(frequency, "mensal" | "semanal");
            html! {
                <>
                    { select_field("Frequência", frequency, frequency_options(), bind_select(form, |f, v| f.recurrence.frequency = v)) }
                    if has_interval {
                        { input_field("Repetir a cada", "number", &form.recurrence.interval, bind_text(form, |f, v| f.recurrence.interval = v)) }
                    }
                    if frequency == "semanal" {
                        { select_field("Dia da semana", &form.recurrence.weekday, weekday_options(), bind_select(form, |f, v| f.recurrence.weekday = v)) }
                    }
                </>
            }
        }
        ExpenseKind::Parcelada => {
            let preview = if form.amount.trim().is_empty() || form.installments.trim().is_empty() {
                html! {}
            } else {
                match form.installment_preview(cards) {
                    Ok(schedule) => {
                        let cycle = parse_optional_id(&form.card_id)
                            .and_then(|id| cards.iter().find(|c| c.id == Some(id)))
                            .and_then(|c| c.cycle().ok());
                        let first_invoice = match (cycle, parse_date(&form.date)) {
                            (Some(cycle), Some(date)) => invoice_label(&cycle, date),
                            _ => None,
                        };
                        let today = chrono::Local::now().date_naive();
                        let open = open_installments(&schedule, today);
                        let open_total: f64 = open.iter().map(|i| i.amount).sum();
                        html! {
                            <div class="md:col-span-2 text-sm">
                                if let Some(label) = first_invoice {
                                    <p class="mb-2 text-muted-foreground">{ format!("Primeira parcela na {}", label) }</p>
                                }
                                <p class="mb-2 text-muted-foreground">
                                    { format!("{} de {} parcela(s) em aberto, {}", open.len(), schedule.len(), format_currency(open_total)) }
                                </p>
                                <table class="w-full">
                                    <thead class="text-left text-muted-foreground">
                                        <tr><th>{"Parcela"}</th><th>{"Vencimento"}</th><th class="text-right">{"Valor"}</th></tr>
                                    </thead>
                                    <tbody>
                                        { for schedule.iter().map(|row| html! {
                                            <tr>
                                                <td>{ format!("{}/{}", row.number, schedule.len()) }</td>
                                                <td>{ format_date(row.due_date) }</td>
                                                <td class="text-right">{ format_currency(row.amount) }</td>
                                            </tr>
                                        }) }
                                    </tbody>
                                </table>
                            </div>
                        }
                    }
                    Err(err) => html! {
                        <p class="md:col-span-2 text-sm text-red-600">{ err.to_string() }</p>
                    },
                }
            };
            html! {
                <>
                    { input_field("Número de parcelas", "number", &form.installments, bind_text(form, |f, v| f.installments = v)) }
                    { preview }
                </>
            }
        }
        ExpenseKind::Consorcio => {
            let estimate = if form.credit_value.trim().is_empty() || form.term_months.trim().is_empty() {
                html! {}
            } else {
                match form.consortium_estimate() {
                    Ok(estimate) => html! {
                        <div class="md:col-span-2 grid grid-cols-2 gap-2 text-sm bg-slate-50 rounded p-3">
                            <span>{"Fundo comum"}</span><span class="text-right">{ format_currency(estimate.common_fund_share) }</span>
                            <span>{"Taxa de administração"}</span><span class="text-right">{ format_currency(estimate.admin_share) }</span>
                            <span>{"Fundo de reserva"}</span><span class="text-right">{ format_currency(estimate.reserve_share) }</span>
                            <span>{"Seguro"}</span><span class="text-right">{ format_currency(estimate.insurance) }</span>
                            <span class="font-bold">{"Parcela mensal"}</span><span class="text-right font-bold">{ format_currency(estimate.monthly_premium) }</span>
                            <span>{"Custo total"}</span><span class="text-right">{ format_currency(estimate.total_cost) }</span>
                            <span>{"Custo efetivo"}</span><span class="text-right">{ format_percent(estimate.effective_cost_pct) }</span>
                            if estimate.bid_value > 0.0 {
                                <span>{"Lance"}</span><span class="text-right">{ format_currency(estimate.bid_value) }</span>
                                <span>{"Parcela após o lance"}</span><span class="text-right">{ format_currency(estimate.premium_after_bid) }</span>
                            }
                        </div>
                    },
                    Err(err) => html! {
                        <p class="md:col-span-2 text-sm text-red-600">{ err.to_string() }</p>
                    },
                }
            };
            html! {
                <>
                    { input_field("Valor da carta", "text", &form.credit_value, bind_text(form, |f, v| f.credit_value = v)) }
                    { input_field("Prazo (meses)", "number", &form.term_months, bind_text(form, |f, v| f.term_months = v)) }
                    { input_field("Taxa de administração (%)", "text", &form.admin_fee_pct, bind_text(form, |f, v| f.admin_fee_pct = v)) }
                    { input_field("Fundo de reserva (%)", "text", &form.reserve_fund_pct, bind_text(form, |f, v| f.reserve_fund_pct = v)) }
                    { input_field("Seguro mensal (%)", "text", &form.insurance_pct, bind_text(form, |f, v| f.insurance_pct = v)) }
                    { input_field("Lance (%)", "text", &form.bid_pct, bind_text(form, |f, v| f.bid_pct = v)) }
                    { estimate }
                </>
            }
        }
    }
}

#[function_component(ExpensesPage)]
pub fn expenses_page() -> Html {
    let api = use_api();
    let version = use_state(|| 0u32);
    let expenses = use_list::<Expense>(api::EXPENSES.to_string(), *version);
    let categories = use_list::<Category>(api::CATEGORIES.to_string(), 0);
    let accounts = use_list::<Account>(api::ACCOUNTS.to_string(), 0);
    let cards = use_list::<CreditCard>(api::CARDS.to_string(), 0);

    let filter = use_state(|| ExpenseFilter {
        month: Some(MonthRef::today()),
        ..ExpenseFilter::default()
    });
    let mode = use_state(|| FormMode::Closed);
    let form = use_state(ExpenseForm::default);
    let saving = use_state(|| false);

    let categories_list: &[Category] = categories.as_deref().unwrap_or(&[]);
    let accounts_list: &[Account] = accounts.as_deref().unwrap_or(&[]);
    let cards_list: &[CreditCard] = cards.as_deref().unwrap_or(&[]);

    let on_new = {
        let mode = mode.clone();
        let form = form.clone();
        Callback::from(move |_: MouseEvent| {
            form.set(ExpenseForm::default());
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
                match api.save::<_, Expense>(api::EXPENSES, record.id, &record).await {
                    Ok(saved) => {
                        tracing::info!(id = ?saved.id, kind = saved.kind.code(), "expense saved");
                        mode.set(FormMode::Closed);
                        version.set(*version + 1);
                    }
                    Err(err) => report_error("Não foi possível salvar a despesa", &err),
                }
                saving.set(false);
            });
        })
    };

    let edit = {
        let mode = mode.clone();
        let form = form.clone();
        move |expense: &Expense| {
            let mode = mode.clone();
            let form = form.clone();
            let expense = expense.clone();
            Callback::from(move |_: MouseEvent| {
                if let Some(id) = expense.id {
                    form.set(ExpenseForm::from_record(&expense));
                    mode.set(FormMode::Edit(id));
                }
            })
        }
    };

    let toggle_paid = {
        let api = api.clone();
        let version = version.clone();
        move |expense: &Expense| {
            let api = api.clone();
            let version = version.clone();
            let mut updated = expense.clone();
            updated.paid = !updated.paid;
            Callback::from(move |_: Event| {
                let Some(id) = updated.id else { return };
                let api = api.clone();
                let version = version.clone();
                let updated = updated.clone();
                spawn_local(async move {
                    match api.update::<_, Expense>(api::EXPENSES, id, &updated).await {
                        Ok(_) => version.set(*version + 1),
                        Err(err) => report_error("Não foi possível atualizar a despesa", &err),
                    }
                });
            })
        }
    };

    let remove = {
        let api = api.clone();
        let version = version.clone();
        move |expense: &Expense| {
            let api = api.clone();
            let version = version.clone();
            let id = expense.id;
            let description = expense.description.clone();
            Callback::from(move |_: MouseEvent| {
                let Some(id) = id else { return };
                if !confirm(&format!("Excluir a despesa \"{}\"?", description)) {
                    return;
                }
                let api = api.clone();
                let version = version.clone();
                spawn_local(async move {
                    match api.delete(api::EXPENSES, id).await {
                        Ok(()) => version.set(*version + 1),
                        Err(err) => report_error("Não foi possível excluir a despesa", &err),
                    }
                });
            })
        }
    };

    let visible = expenses.as_ref().map(|list| filter.apply(list));
    let totals = visible
        .as_deref()
        .map(expense_totals)
        .unwrap_or_default();

    let expense_categories: Vec<Category> = categories_list
        .iter()
        .filter(|c| c.kind == CategoryKind::Despesa)
        .cloned()
        .collect();
    let category_options = id_options(&expense_categories, "Todas as categorias", |c: &Category| {
        (c.id, c.name.clone())
    });
    let account_options = id_options(accounts_list, "Todas as contas", |a: &Account| {
        (a.id, a.name.clone())
    });
    let card_options = id_options(cards_list, "Todos os cartões", |c: &CreditCard| {
        (c.id, c.name.clone())
    });
    let id_value = |id: Option<i64>| id.map(|id| id.to_string()).unwrap_or_default();

    let filter_bar = html! {
        <div class="bg-card rounded-[10px] shadow-sm border border-border p-4 grid grid-cols-2 md:grid-cols-4 gap-3">
            { input_field("Mês", "month", &filter.month.map(|m| m.to_string()).unwrap_or_default(),
                bind_text(&filter, |f, v| f.month = v.parse::<MonthRef>().ok())) }
            { select_field("Categoria", &id_value(filter.category_id), category_options,
                bind_select(&filter, |f, v| f.category_id = v.parse().ok())) }
            { select_field("Conta", &id_value(filter.account_id), account_options,
                bind_select(&filter, |f, v| f.account_id = v.parse().ok())) }
            { select_field("Cartão", &id_value(filter.card_id), card_options,
                bind_select(&filter, |f, v| f.card_id = v.parse().ok())) }
            { select_field("Situação", filter.status.code(), status_options(),
                bind_select(&filter, |f, v| f.status = StatusFilter::from_code(&v))) }
            { select_field("Tipo", filter.kind.map(|k| k.code()).unwrap_or(""), kind_options(true),
                bind_select(&filter, |f, v| f.kind = (!v.is_empty()).then(|| ExpenseKind::from_code(&v)))) }
            { input_field("Buscar", "search", &filter.search, bind_text(&filter, |f, v| f.search = v)) }
        </div>
    };

    let rows = match visible.as_ref() {
        None => loading_row(7),
        Some(list) if list.is_empty() => empty_row(7, "Nenhuma despesa encontrada."),
        Some(list) => html! {
            { for list.iter().map(|expense| {
                let rule = expense.effective_recurrence();
                let card = card_name(cards_list, expense.card_id);
                html! {
                    <tr class="border-t border-border">
                        <td class="p-3">{ format_date(expense.date) }</td>
                        <td class="p-3 font-medium">
                            { expense.description.clone() }
                            if let Some(card) = card {
                                <span class="ml-2 text-xs text-muted-foreground">{ card }</span>
                            }
                        </td>
                        <td class="p-3">{ category_name(categories_list, expense.category_id) }</td>
                        <td class="p-3">
                            { expense.kind.label() }
                            if expense.kind != ExpenseKind::Avulsa {
                                <span class="ml-2 text-xs text-muted-foreground">{ rule.label() }</span>
                            }
                        </td>
                        <td class="p-3 text-right">{ format_currency(expense.amount) }</td>
                        <td class="p-3 text-center">
                            <input type="checkbox" checked={expense.paid} onchange={toggle_paid(expense)} />
                        </td>
                        <td class="p-3 text-right space-x-2">
                            <button onclick={edit(expense)} class="text-primary">{"Editar"}</button>
                            <button onclick={remove(expense)} class="text-red-600">{"Excluir"}</button>
                        </td>
                    </tr>
                }
            }) }
        },
    };

    let modal = if mode.is_open() {
        let form_categories = id_options(&expense_categories, "Sem categoria", |c: &Category| {
            (c.id, c.name.clone())
        });
        html! {
            <Modal title={mode.title("Nova despesa", "Editar despesa")} on_close={on_close} on_save={on_save} saving={*saving}>
                { input_field("Descrição", "text", &form.description, bind_text(&form, |f, v| f.description = v)) }
                { select_field("Tipo", &form.kind, kind_options(false), bind_select(&form, |f, v| f.kind = v)) }
                { input_field(
                    if form.kind() == ExpenseKind::Consorcio { "Valor da parcela (vazio = estimado)" } else { "Valor" },
                    "text", &form.amount, bind_text(&form, |f, v| f.amount = v)) }
                { input_field("Data", "date", &form.date, bind_text(&form, |f, v| f.date = v)) }
                { select_field("Categoria", &form.category_id, form_categories, bind_select(&form, |f, v| f.category_id = v)) }
                { select_field("Conta", &form.account_id, id_options(accounts_list, "Nenhuma", |a: &Account| (a.id, a.name.clone())),
                    bind_select(&form, |f, v| f.account_id = v)) }
                { select_field("Cartão", &form.card_id, id_options(cards_list, "Nenhum", |c: &CreditCard| (c.id, c.name.clone())),
                    bind_select(&form, |f, v| f.card_id = v)) }
                { check_field("Paga", form.paid, bind_check(&form, |f, v| f.paid = v)) }
                { kind_fields(&form, cards_list) }
                { input_field("Observações", "text", &form.notes, bind_text(&form, |f, v| f.notes = v)) }
            </Modal>
        }
    } else {
        html! {}
    };

    page_shell(
        "Despesas",
        primary_button("Nova despesa", on_new),
        html! {
            <>
                { filter_bar }
                <div class="grid grid-cols-1 md:grid-cols-3 gap-6">
                    <StatCard title="Total" amount={totals.total} icon={StatIcon::Wallet} />
                    <StatCard title="Pagas" amount={totals.settled} icon={StatIcon::UpRight} />
                    <StatCard title="Pendentes" amount={totals.pending} icon={StatIcon::Calendar} />
                </div>
                <div class="bg-card rounded-[10px] shadow-sm border border-border overflow-x-auto">
                    <table class="w-full text-sm">
                        <thead class="bg-slate-50 text-left text-muted-foreground">
                            <tr>
                                <th class="p-3">{"Data"}</th>
                                <th class="p-3">{"Descrição"}</th>
                                <th class="p-3">{"Categoria"}</th>
                                <th class="p-3">{"Tipo"}</th>
                                <th class="p-3 text-right">{"Valor"}</th>
                                <th class="p-3 text-center">{"Paga"}</th>
                                <th class="p-3"></th>
                            </tr>
                        </thead>
                        <tbody>{ rows }</tbody>
                    </table>
                </div>
                { modal }
            </>
        },
    )
}
