use yew::prelude::*;

use crate::api;
use crate::calendar::MonthRef;
use crate::filters::{month_summary, totals_by_category, ExpenseFilter, StatusFilter};
use crate::format::{format_currency, format_date, format_percent};
use crate::models::{Category, Expense, Income};
use crate::ui::components::{use_list, StatCard, StatIcon};

const PENDING_LIMIT: usize = 8;

#[function_component(DashboardPage)]
pub fn dashboard_page() -> Html {
    let month = use_state(MonthRef::today);
    let expenses = use_list::<Expense>(api::EXPENSES.to_string(), 0);
    let incomes = use_list::<Income>(api::INCOMES.to_string(), 0);
    let categories = use_list::<Category>(api::CATEGORIES.to_string(), 0);

    let previous = {
        let month = month.clone();
        Callback::from(move |_: MouseEvent| month.set(month.previous()))
    };
    let next = {
        let month = month.clone();
        Callback::from(move |_: MouseEvent| month.set(month.next()))
    };

    let expenses = expenses.as_deref().unwrap_or(&[]);
    let incomes = incomes.as_deref().unwrap_or(&[]);
    let categories = categories.as_deref().unwrap_or(&[]);

    let summary = month_summary(expenses, incomes, *month);
    let in_month = ExpenseFilter {
        month: Some(*month),
        ..ExpenseFilter::default()
    }
    .apply(expenses);
    let by_category = totals_by_category(&in_month, categories);
    let mut pending = ExpenseFilter {
        month: Some(*month),
        status: StatusFilter::Pending,
        ..ExpenseFilter::default()
    }
    .apply(expenses);
    pending.sort_by_key(|e| e.date);

    html! {
        <div class="p-6 max-w-7xl mx-auto space-y-6">
            <div class="flex items-center justify-between pb-4 border-b border-border">
                <h1 class="text-2xl font-bold text-foreground">{"Resumo"}</h1>
                <div class="flex items-center gap-3">
                    <button onclick={previous} class="px-3 py-1 rounded border">{"‹"}</button>
                    <span class="font-bold text-[#173E63] min-w-[90px] text-center">{ month.label() }</span>
                    <button onclick={next} class="px-3 py-1 rounded border">{"›"}</button>
                </div>
            </div>

            <div class="grid grid-cols-1 md:grid-cols-4 gap-6">
                <StatCard title="RECEITAS" amount={summary.income} icon={StatIcon::UpRight} />
                <StatCard title="DESPESAS" amount={summary.expenses} icon={StatIcon::CreditCard} />
                <StatCard title="SALDO" amount={summary.balance} icon={StatIcon::Wallet} />
                <StatCard title="COMPROMETIDO" amount={summary.committed} icon={StatIcon::Calendar} />
            </div>

            <div class="grid grid-cols-1 lg:grid-cols-2 gap-6">
                <div class="bg-card rounded-[10px] shadow-sm border border-border p-5">
                    <h2 class="text-sm font-bold text-[#173E63] mb-4">{"Despesas por categoria"}</h2>
                    if by_category.is_empty() {
                        <p class="text-sm text-muted-foreground">{"Nenhuma despesa no mês."}</p>
                    }
                    <div class="space-y-3">
                        { for by_category.iter().map(|row| html! {
                            <div class="text-sm">
                                <div class="flex justify-between mb-1">
                                    <span>{ row.name.clone() }</span>
                                    <span class="text-muted-foreground">
                                        { format!("{} · {}", format_currency(row.total), format_percent(row.share_pct)) }
                                    </span>
                                </div>
                                <div class="h-2 bg-slate-100 rounded">
                                    <div class="h-2 bg-[#1D617A] rounded" style={format!("width:{}%", row.share_pct.clamp(0.0, 100.0))}></div>
                                </div>
                            </div>
                        }) }
                    </div>
                </div>

                <div class="bg-card rounded-[10px] shadow-sm border border-border p-5">
                    <h2 class="text-sm font-bold text-[#173E63] mb-4">{"Contas a pagar"}</h2>
                    if pending.is_empty() {
                        <p class="text-sm text-muted-foreground">{"Nada pendente neste mês."}</p>
                    }
                    <ul class="divide-y divide-border text-sm">
                        { for pending.iter().take(PENDING_LIMIT).map(|expense| html! {
                            <li class="flex justify-between py-2">
                                <span>
                                    <span class="text-muted-foreground mr-2">{ format_date(expense.date) }</span>
                                    { expense.description.clone() }
                                </span>
                                <span class="font-medium">{ format_currency(expense.amount) }</span>
                            </li>
                        }) }
                    </ul>
                    if pending.len() > PENDING_LIMIT {
                        <p class="pt-2 text-xs text-muted-foreground">
                            { format!("e mais {} despesa(s) pendente(s)", pending.len() - PENDING_LIMIT) }
                        </p>
                    }
                </div>
            </div>
        </div>
    }
}
