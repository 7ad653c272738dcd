use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::api;
use crate::financing::AmortizationTable;
use crate::format::{format_currency, format_date, format_percent};
use crate::forms::FinancingForm;
use crate::models::Financing;
use crate::ui::components::{
    alert, bind_check, bind_select, bind_text, check_field, confirm, empty_row, input_field,
    loading_row, page_shell, primary_button, report_error, select_field, use_api, use_list,
    FormMode,
};
use crate::validation::{parse_count, parse_optional_amount};

#[derive(Clone, Default, PartialEq)]
struct PrepaymentFields {
    after: String,
    amount: String,
}

impl PrepaymentFields {
    /// `(installment, amount)` once both fields hold usable values.
    fn parsed(&self) -> Option<(u32, f64)> {
        let after = parse_count(&self.after, "parcela").ok()?;
        let amount = parse_optional_amount(&self.amount, "valor").ok()?;
        (after >= 1 && amount > 0.0).then_some((after, amount))
    }
}

struct Simulation {
    table: AmortizationTable,
    baseline: Option<AmortizationTable>,
}

fn simulate(form: &FinancingForm, prepayment: &PrepaymentFields) -> Result<Simulation, String> {
    let mut draft = form.clone();
    if draft.description.trim().is_empty() {
        draft.description = "Simulação".to_string();
    }
    let terms = draft.to_record(None).map_err(|e| e.to_string())?.terms();
    let baseline = terms.amortization_table().map_err(|e| e.to_string())?;
    match prepayment.parsed() {
        Some((after, amount)) => Ok(Simulation {
            table: terms
                .with_prepayment(after, amount)
                .map_err(|e| e.to_string())?,
            baseline: Some(baseline),
        }),
        None => Ok(Simulation {
            table: baseline,
            baseline: None,
        }),
    }
}

fn simulation_view(simulation: &Simulation) -> Html {
    let table = &simulation.table;
    html! {
        <div class="space-y-4">
            <div class="grid grid-cols-2 md:grid-cols-4 gap-3 text-sm">
                <div class="bg-card rounded-[10px] border border-border p-3">
                    <p class="text-muted-foreground text-xs">{"Primeira parcela"}</p>
                    <p class="font-bold">{ format_currency(table.first_payment().unwrap_or(0.0)) }</p>
                </div>
                <div class="bg-card rounded-[10px] border border-border p-3">
                    <p class="text-muted-foreground text-xs">{"Última parcela"}</p>
                    <p class="font-bold">{ format_currency(table.last_payment().unwrap_or(0.0)) }</p>
                </div>
                <div class="bg-card rounded-[10px] border border-border p-3">
                    <p class="text-muted-foreground text-xs">{"Total pago"}</p>
                    <p class="font-bold">{ format_currency(table.total_paid) }</p>
                </div>
                <div class="bg-card rounded-[10px] border border-border p-3">
                    <p class="text-muted-foreground text-xs">{"Total de juros"}</p>
                    <p class="font-bold text-red-600">{ format_currency(table.total_interest) }</p>
                </div>
            </div>

            if let Some(baseline) = simulation.baseline.as_ref() {
                <p class="text-sm text-[#1D617A]">
                    { format!(
                        "A amortização extra economiza {} em juros e encerra o contrato {} parcela(s) antes.",
                        format_currency(baseline.total_interest - table.total_interest),
                        baseline.rows.len().saturating_sub(table.rows.len()),
                    ) }
                </p>
            }

            <div class="bg-card rounded-[10px] shadow-sm border border-border overflow-x-auto max-h-[480px]">
                <table class="w-full text-sm">
                    <thead class="bg-slate-50 text-left text-muted-foreground sticky top-0">
                        <tr>
                            <th class="p-2">{"Nº"}</th>
                            <th class="p-2">{"Vencimento"}</th>
                            <th class="p-2 text-right">{"Parcela"}</th>
                            <th class="p-2 text-right">{"Juros"}</th>
                            <th class="p-2 text-right">{"Amortização"}</th>
                            <th class="p-2 text-right">{"Extra"}</th>
                            <th class="p-2 text-right">{"Saldo"}</th>
                        </tr>
                    </thead>
                    <tbody>
                        { for table.rows.iter().map(|row| html! {
                            <tr class="border-t border-border">
                                <td class="p-2">{ row.number.to_string() }</td>
                                <td class="p-2">{ format_date(row.due_date) }</td>
                                <td class="p-2 text-right">{ format_currency(row.payment) }</td>
                                <td class="p-2 text-right">{ format_currency(row.interest) }</td>
                                <td class="p-2 text-right">{ format_currency(row.amortization) }</td>
                                <td class="p-2 text-right">
                                    { if row.extra > 0.0 { format_currency(row.extra) } else { String::new() } }
                                </td>
                                <td class="p-2 text-right">{ format_currency(row.balance) }</td>
                            </tr>
                        }) }
                    </tbody>
                </table>
            </div>
        </div>
    }
}

#[function_component(FinancingPage)]
pub fn financing_page() -> Html {
    let api = use_api();
    let version = use_state(|| 0u32);
    let financings = use_list::<Financing>(api::FINANCINGS.to_string(), *version);

    let mode = use_state(|| FormMode::Create);
    let form = use_state(FinancingForm::default);
    let prepayment = use_state(PrepaymentFields::default);
    let saving = use_state(|| false);

    let on_new = {
        let mode = mode.clone();
        let form = form.clone();
        let prepayment = prepayment.clone();
        Callback::from(move |_: MouseEvent| {
            form.set(FinancingForm::default());
            prepayment.set(PrepaymentFields::default());
            mode.set(FormMode::Create);
        })
    };

    let on_save = {
        let api = api.clone();
        let form = form.clone();
        let mode = mode.clone();
        let saving = saving.clone();
        let version = version.clone();
        Callback::from(move |_: MouseEvent| {
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
                match api.save::<_, Financing>(api::FINANCINGS, record.id, &record).await {
                    Ok(saved) => {
                        if let Some(id) = saved.id {
                            mode.set(FormMode::Edit(id));
                        }
                        version.set(*version + 1);
                    }
                    Err(err) => report_error("Não foi possível salvar o financiamento", &err),
                }
                saving.set(false);
            });
        })
    };

    // Reloads the record so the simulator starts from what the server holds.
    let open = {
        let api = api.clone();
        let mode = mode.clone();
        let form = form.clone();
        let prepayment = prepayment.clone();
        move |financing: &Financing| {
            let api = api.clone();
            let mode = mode.clone();
            let form = form.clone();
            let prepayment = prepayment.clone();
            let id = financing.id;
            Callback::from(move |_: MouseEvent| {
                let Some(id) = id else { return };
                let api = api.clone();
                let mode = mode.clone();
                let form = form.clone();
                let prepayment = prepayment.clone();
                spawn_local(async move {
                    match api.get::<Financing>(api::FINANCINGS, id).await {
                        Ok(financing) => {
                            form.set(FinancingForm::from_record(&financing));
                            prepayment.set(PrepaymentFields::default());
                            mode.set(FormMode::Edit(id));
                        }
                        Err(err) => report_error("Não foi possível abrir o financiamento", &err),
                    }
                });
            })
        }
    };

    let remove = {
        let api = api.clone();
        let version = version.clone();
        let mode = mode.clone();
        move |financing: &Financing| {
            let api = api.clone();
            let version = version.clone();
            let mode = mode.clone();
            let id = financing.id;
            let description = financing.description.clone();
            Callback::from(move |_: MouseEvent| {
                let Some(id) = id else { return };
                if !confirm(&format!("Excluir o financiamento \"{}\"?", description)) {
                    return;
                }
                let api = api.clone();
                let version = version.clone();
                let mode = mode.clone();
                spawn_local(async move {
                    match api.delete(api::FINANCINGS, id).await {
                        Ok(()) => {
                            if mode.id() == Some(id) {
                                mode.set(FormMode::Create);
                            }
                            version.set(*version + 1);
                        }
                        Err(err) => report_error("Não foi possível excluir o financiamento", &err),
                    }
                });
            })
        }
    };

    let ready = !form.asset_value.trim().is_empty()
        && !form.rate_pct.trim().is_empty()
        && !form.term_months.trim().is_empty();
    let preview = if !ready {
        html! {
            <p class="text-sm text-muted-foreground">
                {"Informe valor do bem, taxa e prazo para ver a tabela de amortização."}
            </p>
        }
    } else {
        match simulate(&form, &prepayment) {
            Ok(simulation) => simulation_view(&simulation),
            Err(message) => html! { <p class="text-sm text-red-600">{ message }</p> },
        }
    };

    let system_options = vec![
        ("price".to_string(), "Price (parcelas fixas)".to_string()),
        ("sac".to_string(), "SAC (amortização constante)".to_string()),
    ];

    let saved_rows = match financings.as_ref() {
        None => loading_row(6),
        Some(list) if list.is_empty() => empty_row(6, "Nenhum financiamento salvo."),
        Some(list) => html! {
            { for list.iter().map(|financing| {
                let first_payment = financing
                    .terms()
                    .amortization_table()
                    .ok()
                    .and_then(|t| t.first_payment());
                html! {
                    <tr class="border-t border-border">
                        <td class="p-3 font-medium">{ financing.description.clone() }</td>
                        <td class="p-3">{ financing.system.label() }</td>
                        <td class="p-3 text-right">{ format_currency(financing.principal()) }</td>
                        <td class="p-3 text-right">
                            { format!("{} × {}", financing.term_months, first_payment.map(format_currency).unwrap_or_else(|| "-".to_string())) }
                        </td>
                        <td class="p-3 text-right">{ format!("{} a.m.", format_percent(financing.monthly_rate_pct)) }</td>
                        <td class="p-3 text-right space-x-2">
                            <button onclick={open(financing)} class="text-primary">{"Abrir"}</button>
                            <button onclick={remove(financing)} class="text-red-600">{"Excluir"}</button>
                        </td>
                    </tr>
                }
            }) }
        },
    };

    let title = mode.title("Nova simulação", "Editar financiamento");

    page_shell(
        "Financiamentos",
        primary_button("Nova simulação", on_new),
        html! {
            <>
                <div class="grid grid-cols-1 lg:grid-cols-[340px_1fr] gap-6">
                    <div class="bg-card rounded-[10px] shadow-sm border border-border p-5 space-y-3">
                        <h2 class="text-sm font-bold text-[#173E63]">{ title }</h2>
                        { input_field("Descrição", "text", &form.description, bind_text(&form, |f, v| f.description = v)) }
                        { input_field("Valor do bem", "text", &form.asset_value, bind_text(&form, |f, v| f.asset_value = v)) }
                        { input_field("Entrada", "text", &form.down_payment, bind_text(&form, |f, v| f.down_payment = v)) }
                        { input_field("Taxa de juros (%)", "text", &form.rate_pct, bind_text(&form, |f, v| f.rate_pct = v)) }
                        { check_field("Taxa anual", form.rate_is_annual, bind_check(&form, |f, v| f.rate_is_annual = v)) }
                        { input_field("Prazo (meses)", "number", &form.term_months, bind_text(&form, |f, v| f.term_months = v)) }
                        { select_field("Sistema", &form.system, system_options, bind_select(&form, |f, v| f.system = v)) }
                        { input_field("Primeira parcela", "date", &form.first_due, bind_text(&form, |f, v| f.first_due = v)) }

                        <h3 class="pt-2 text-xs font-bold text-muted-foreground">{"Amortização extra"}</h3>
                        { input_field("Após a parcela", "number", &prepayment.after, bind_text(&prepayment, |p, v| p.after = v)) }
                        { input_field("Valor", "text", &prepayment.amount, bind_text(&prepayment, |p, v| p.amount = v)) }

                        <button onclick={on_save} disabled={*saving} class="w-full bg-accent text-white px-4 py-2 rounded">
                            { if *saving { "Salvando..." } else { "Salvar financiamento" } }
                        </button>
                    </div>
                    { preview }
                </div>

                <div class="bg-card rounded-[10px] shadow-sm border border-border overflow-x-auto">
                    <table class="w-full text-sm">
                        <thead class="bg-slate-50 text-left text-muted-foreground">
                            <tr>
                                <th class="p-3">{"Descrição"}</th>
                                <th class="p-3">{"Sistema"}</th>
                                <th class="p-3 text-right">{"Financiado"}</th>
                                <th class="p-3 text-right">{"Parcelas"}</th>
                                <th class="p-3 text-right">{"Taxa"}</th>
                                <th class="p-3"></th>
                            </tr>
                        </thead>
                        <tbody>{ saved_rows }</tbody>
                    </table>
                </div>
            </>
        },
    )
}
