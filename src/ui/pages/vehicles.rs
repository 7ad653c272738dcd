use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::expenses::{frequency_options, weekday_options};
use crate::api;
use crate::format::{format_currency, format_date};
use crate::forms::{VehicleExpenseForm, VehicleForm};
use crate::models::{Vehicle, VehicleExpense, VehicleExpenseKind};
use crate::ui::components::{
    alert, bind_check, bind_select, bind_text, check_field, confirm, empty_row, input_field,
    loading_row, page_shell, primary_button, report_error, select_field, use_api, use_list,
    FormMode, Modal, StatCard, StatIcon,
};
use crate::vehicle::{consolidate, VehicleProjection, DEFAULT_HORIZON_MONTHS};

const HORIZONS: [u32; 5] = [3, 6, 12, 24, 36];

fn projection_view(projection: &VehicleProjection) -> Html {
    html! {
        <>
            <div class="grid grid-cols-1 md:grid-cols-3 gap-6">
                <StatCard title="Custo mensal estimado" amount={projection.monthly_estimate} icon={StatIcon::Calendar} />
                <StatCard title="Custo no período" amount={projection.horizon_total} icon={StatIcon::Wallet} />
                <StatCard title="Custo anual" amount={projection.annual_estimate} icon={StatIcon::UpRight} />
            </div>
            if let Some(per_km) = projection.cost_per_km {
                <p class="text-sm text-muted-foreground">{ format!("Custo por km: {}", format_currency(per_km)) }</p>
            }
            if projection.fuel_estimated {
                <p class="text-xs text-muted-foreground">{"Combustível estimado a partir do consumo e da quilometragem do veículo."}</p>
            }

            <div class="bg-card rounded-[10px] shadow-sm border border-border overflow-x-auto">
                <table class="w-full text-sm">
                    <thead class="bg-slate-50 text-left text-muted-foreground">
                        <tr>
                            <th class="p-3">{"Tipo"}</th>
                            <th class="p-3 text-right">{"Lançamentos"}</th>
                            <th class="p-3 text-right">{"Média mensal"}</th>
                            <th class="p-3 text-right">{"Mensal de longo prazo"}</th>
                            <th class="p-3 text-right">{"Total no período"}</th>
                        </tr>
                    </thead>
                    <tbody>
                        if projection.groups.is_empty() {
                            { empty_row(5, "Nenhum custo previsto.") }
                        }
                        { for projection.groups.iter().map(|group| html! {
                            <tr class="border-t border-border">
                                <td class="p-3 font-medium">
                                    { group.kind.label() }
                                    if group.estimated {
                                        <span class="ml-2 text-xs text-muted-foreground">{"estimado"}</span>
                                    }
                                </td>
                                <td class="p-3 text-right">{ group.entries.to_string() }</td>
                                <td class="p-3 text-right">{ format_currency(group.monthly_estimate) }</td>
                                <td class="p-3 text-right">{ format_currency(group.long_run_monthly) }</td>
                                <td class="p-3 text-right">{ format_currency(group.horizon_total) }</td>
                            </tr>
                        }) }
                    </tbody>
                </table>
            </div>

            <div class="bg-card rounded-[10px] shadow-sm border border-border overflow-x-auto">
                <table class="w-full text-sm">
                    <thead class="bg-slate-50 text-left text-muted-foreground">
                        <tr>
                            <th class="p-3">{"Mês"}</th>
                            { for projection.groups.iter().map(|g| html! { <th class="p-3 text-right">{ g.kind.label() }</th> }) }
                            <th class="p-3 text-right">{"Total"}</th>
                        </tr>
                    </thead>
                    <tbody>
                        { for projection.months.iter().map(|month| html! {
                            <tr class="border-t border-border">
                                <td class="p-3">{ month.month.label() }</td>
                                { for projection.groups.iter().map(|g| html! {
                                    <td class="p-3 text-right">
                                        { format_currency(month.by_kind.get(&g.kind).copied().unwrap_or(0.0)) }
                                    </td>
                                }) }
                                <td class="p-3 text-right font-bold">{ format_currency(month.total) }</td>
                            </tr>
                        }) }
                    </tbody>
                </table>
            </div>
        </>
    }
}

#[function_component(VehiclesPage)]
pub fn vehicles_page() -> Html {
    let api = use_api();
    let version = use_state(|| 0u32);
    let vehicles = use_list::<Vehicle>(api::VEHICLES.to_string(), *version);

    let selected = use_state(|| None::<i64>);
    let horizon = use_state(|| DEFAULT_HORIZON_MONTHS);

    let vehicle = vehicles.as_ref().and_then(|list| {
        selected
            .and_then(|id| list.iter().find(|v| v.id == Some(id)))
            .or_else(|| list.first())
            .cloned()
    });
    let vehicle_id = vehicle.as_ref().and_then(|v| v.id);
    let records_path = vehicle_id.map(api::vehicle_expenses).unwrap_or_default();

    let records_version = use_state(|| 0u32);
    let records = use_list::<VehicleExpense>(records_path.clone(), *records_version);

    let vehicle_mode = use_state(|| FormMode::Closed);
    let vehicle_form = use_state(VehicleForm::default);
    let record_mode = use_state(|| FormMode::Closed);
    let record_form = use_state(VehicleExpenseForm::default);
    let saving = use_state(|| false);

    let on_new_vehicle = {
        let mode = vehicle_mode.clone();
        let form = vehicle_form.clone();
        Callback::from(move |_: MouseEvent| {
            form.set(VehicleForm::default());
            mode.set(FormMode::Create);
        })
    };

    let close_vehicle = {
        let mode = vehicle_mode.clone();
        Callback::from(move |_: ()| mode.set(FormMode::Closed))
    };

    let save_vehicle = {
        let api = api.clone();
        let form = vehicle_form.clone();
        let mode = vehicle_mode.clone();
        let saving = saving.clone();
        let version = version.clone();
        let selected = selected.clone();
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
            let selected = selected.clone();
            saving.set(true);
            spawn_local(async move {
                match api.save::<_, Vehicle>(api::VEHICLES, record.id, &record).await {
                    Ok(saved) => {
                        mode.set(FormMode::Closed);
                        selected.set(saved.id);
                        version.set(*version + 1);
                    }
                    Err(err) => report_error("Não foi possível salvar o veículo", &err),
                }
                saving.set(false);
            });
        })
    };

    let select = {
        let selected = selected.clone();
        move |id: Option<i64>| {
            let selected = selected.clone();
            Callback::from(move |_: MouseEvent| selected.set(id))
        }
    };

    let edit_vehicle = {
        let mode = vehicle_mode.clone();
        let form = vehicle_form.clone();
        move |vehicle: &Vehicle| {
            let mode = mode.clone();
            let form = form.clone();
            let vehicle = vehicle.clone();
            Callback::from(move |_: MouseEvent| {
                if let Some(id) = vehicle.id {
                    form.set(VehicleForm::from_record(&vehicle));
                    mode.set(FormMode::Edit(id));
                }
            })
        }
    };

    let remove_vehicle = {
        let api = api.clone();
        let version = version.clone();
        let selected = selected.clone();
        move |vehicle: &Vehicle| {
            let api = api.clone();
            let version = version.clone();
            let selected = selected.clone();
            let id = vehicle.id;
            let name = vehicle.name.clone();
            Callback::from(move |_: MouseEvent| {
                let Some(id) = id else { return };
                if !confirm(&format!("Excluir o veículo \"{}\" e seus custos previstos?", name)) {
                    return;
                }
                let api = api.clone();
                let version = version.clone();
                let selected = selected.clone();
                spawn_local(async move {
                    match api.delete(api::VEHICLES, id).await {
                        Ok(()) => {
                            selected.set(None);
                            version.set(*version + 1);
                        }
                        Err(err) => report_error("Não foi possível excluir o veículo", &err),
                    }
                });
            })
        }
    };

    let on_new_record = {
        let mode = record_mode.clone();
        let form = record_form.clone();
        Callback::from(move |_: MouseEvent| {
            form.set(VehicleExpenseForm::default());
            mode.set(FormMode::Create);
        })
    };

    let close_record = {
        let mode = record_mode.clone();
        Callback::from(move |_: ()| mode.set(FormMode::Closed))
    };

    let save_record = {
        let api = api.clone();
        let form = record_form.clone();
        let mode = record_mode.clone();
        let saving = saving.clone();
        let records_version = records_version.clone();
        let path = records_path.clone();
        Callback::from(move |_: ()| {
            let record = match form.to_record(mode.id(), vehicle_id) {
                Ok(record) => record,
                Err(err) => {
                    alert(&err.to_string());
                    return;
                }
            };
            let api = api.clone();
            let mode = mode.clone();
            let saving = saving.clone();
            let records_version = records_version.clone();
            let path = path.clone();
            saving.set(true);
            spawn_local(async move {
                match api.save::<_, VehicleExpense>(&path, record.id, &record).await {
                    Ok(_) => {
                        mode.set(FormMode::Closed);
                        records_version.set(*records_version + 1);
                    }
                    Err(err) => report_error("Não foi possível salvar o custo previsto", &err),
                }
                saving.set(false);
            });
        })
    };

    let edit_record = {
        let mode = record_mode.clone();
        let form = record_form.clone();
        move |record: &VehicleExpense| {
            let mode = mode.clone();
            let form = form.clone();
            let record = record.clone();
            Callback::from(move |_: MouseEvent| {
                if let Some(id) = record.id {
                    form.set(VehicleExpenseForm::from_record(&record));
                    mode.set(FormMode::Edit(id));
                }
            })
        }
    };

    let remove_record = {
        let api = api.clone();
        let records_version = records_version.clone();
        let path = records_path.clone();
        move |record: &VehicleExpense| {
            let api = api.clone();
            let records_version = records_version.clone();
            let path = path.clone();
            let id = record.id;
            let description = record.description.clone();
            Callback::from(move |_: MouseEvent| {
                let Some(id) = id else { return };
                if !confirm(&format!("Excluir o custo \"{}\"?", description)) {
                    return;
                }
                let api = api.clone();
                let records_version = records_version.clone();
                let path = path.clone();
                spawn_local(async move {
                    match api.delete(&path, id).await {
                        Ok(()) => records_version.set(*records_version + 1),
                        Err(err) => report_error("Não foi possível excluir o custo previsto", &err),
                    }
                });
            })
        }
    };

    let on_horizon = {
        let horizon = horizon.clone();
        Callback::from(move |e: Event| {
            if let Some(select) = e.target_dyn_into::<web_sys::HtmlSelectElement>() {
                horizon.set(select.value().parse().unwrap_or(DEFAULT_HORIZON_MONTHS));
            }
        })
    };

    let today = chrono::Local::now().date_naive();
    let projection = match (vehicle.as_ref(), records.as_ref()) {
        (Some(vehicle), Some(records)) => Some(consolidate(vehicle, records, today, *horizon)),
        _ => None,
    };

    let vehicle_list = match vehicles.as_ref() {
        None => html! { <p class="text-sm text-muted-foreground">{"Carregando..."}</p> },
        Some(list) if list.is_empty() => html! {
            <p class="text-sm text-muted-foreground">{"Nenhum veículo cadastrado."}</p>
        },
        Some(list) => html! {
            <ul class="space-y-2">
                { for list.iter().map(|v| {
                    let active = v.id.is_some() && v.id == vehicle_id;
                    let class = if active {
                        "p-3 rounded-xl border border-[#173E63] bg-[#eef4f9] cursor-pointer"
                    } else {
                        "p-3 rounded-xl border border-border cursor-pointer hover:bg-slate-50"
                    };
                    html! {
                        <li class={class} onclick={select(v.id)}>
                            <p class="font-medium">{ v.name.clone() }</p>
                            <p class="text-xs text-muted-foreground">
                                { v.plate.clone().unwrap_or_default() }
                                { v.year.map(|y| format!(" · {}", y)).unwrap_or_default() }
                            </p>
                            <div class="mt-2 space-x-2 text-xs">
                                <button onclick={edit_vehicle(v)} class="text-primary">{"Editar"}</button>
                                <button onclick={remove_vehicle(v)} class="text-red-600">{"Excluir"}</button>
                            </div>
                        </li>
                    }
                }) }
            </ul>
        },
    };

    let record_rows = match records.as_ref() {
        None => loading_row(6),
        Some(list) if list.is_empty() => empty_row(6, "Nenhum custo previsto cadastrado."),
        Some(list) => html! {
            { for list.iter().map(|record| html! {
                <tr class={if record.active { "border-t border-border" } else { "border-t border-border text-muted-foreground line-through" }}>
                    <td class="p-3">{ record.kind.label() }</td>
                    <td class="p-3">{ record.description.clone() }</td>
                    <td class="p-3">{ record.recurrence.label() }</td>
                    <td class="p-3">{ format_date(record.start) }</td>
                    <td class="p-3 text-right">{ format_currency(record.amount) }</td>
                    <td class="p-3 text-right space-x-2">
                        <button onclick={edit_record(record)} class="text-primary">{"Editar"}</button>
                        <button onclick={remove_record(record)} class="text-red-600">{"Excluir"}</button>
                    </td>
                </tr>
            }) }
        },
    };

    let detail = match vehicle.as_ref() {
        None => html! {},
        Some(vehicle) => html! {
            <div class="space-y-6">
                <div class="flex items-center justify-between">
                    <h2 class="text-lg font-bold text-[#173E63]">{ vehicle.name.clone() }</h2>
                    <label class="flex items-center gap-2 text-sm">
                        <span class="text-muted-foreground">{"Horizonte"}</span>
                        <select onchange={on_horizon} class="p-2 border rounded bg-white">
                            { for HORIZONS.iter().map(|months| html! {
                                <option value={months.to_string()} selected={*months == *horizon}>
                                    { format!("{} meses", months) }
                                </option>
                            }) }
                        </select>
                    </label>
                </div>

                {
                    match projection.as_ref() {
                        Some(projection) => projection_view(projection),
                        None => html! { <p class="text-sm text-muted-foreground">{"Carregando..."}</p> },
                    }
                }

                <div class="flex items-center justify-between">
                    <h3 class="text-sm font-bold text-[#173E63]">{"Custos previstos"}</h3>
                    { primary_button("Novo custo", on_new_record) }
                </div>
                <div class="bg-card rounded-[10px] shadow-sm border border-border overflow-x-auto">
                    <table class="w-full text-sm">
                        <thead class="bg-slate-50 text-left text-muted-foreground">
                            <tr>
                                <th class="p-3">{"Tipo"}</th>
                                <th class="p-3">{"Descrição"}</th>
                                <th class="p-3">{"Recorrência"}</th>
                                <th class="p-3">{"Início"}</th>
                                <th class="p-3 text-right">{"Valor"}</th>
                                <th class="p-3"></th>
                            </tr>
                        </thead>
                        <tbody>{ record_rows }</tbody>
                    </table>
                </div>
            </div>
        },
    };

    let kind_options: Vec<(String, String)> = VehicleExpenseKind::ALL
        .iter()
        .filter(|k| **k != VehicleExpenseKind::Depreciacao)
        .map(|k| (k.code().to_string(), k.label().to_string()))
        .collect();
    let frequency = record_form.recurrence.frequency.clone();
    let mut record_frequencies = frequency_options();
    record_frequencies.insert(0, ("unica".to_string(), "Única".to_string()));
    record_frequencies.push(("parcela".to_string(), "Parcelas".to_string()));

    page_shell(
        "Veículos",
        primary_button("Novo veículo", on_new_vehicle),
        html! {
            <>
                <div class="grid grid-cols-1 md:grid-cols-[260px_1fr] gap-6">
                    <div class="bg-card rounded-[10px] shadow-sm border border-border p-4">
                        { vehicle_list }
                    </div>
                    { detail }
                </div>

                if vehicle_mode.is_open() {
                    <Modal title={vehicle_mode.title("Novo veículo", "Editar veículo")} on_close={close_vehicle} on_save={save_vehicle} saving={*saving}>
                        { input_field("Nome", "text", &vehicle_form.name, bind_text(&vehicle_form, |f, v| f.name = v)) }
                        { input_field("Placa", "text", &vehicle_form.plate, bind_text(&vehicle_form, |f, v| f.plate = v)) }
                        { input_field("Ano", "number", &vehicle_form.year, bind_text(&vehicle_form, |f, v| f.year = v)) }
                        { input_field("Km por mês", "text", &vehicle_form.monthly_km, bind_text(&vehicle_form, |f, v| f.monthly_km = v)) }
                        { input_field("Consumo (km/l)", "text", &vehicle_form.km_per_liter, bind_text(&vehicle_form, |f, v| f.km_per_liter = v)) }
                        { input_field("Preço do combustível", "text", &vehicle_form.fuel_price, bind_text(&vehicle_form, |f, v| f.fuel_price = v)) }
                        { input_field("Valor FIPE", "text", &vehicle_form.market_value, bind_text(&vehicle_form, |f, v| f.market_value = v)) }
                        { input_field("Depreciação anual (%)", "text", &vehicle_form.annual_depreciation_pct, bind_text(&vehicle_form, |f, v| f.annual_depreciation_pct = v)) }
                    </Modal>
                }

                if record_mode.is_open() {
                    <Modal title={record_mode.title("Novo custo previsto", "Editar custo previsto")} on_close={close_record} on_save={save_record} saving={*saving}>
                        { select_field("Tipo", &record_form.kind, kind_options, bind_select(&record_form, |f, v| f.kind = v)) }
                        { input_field("Descrição", "text", &record_form.description, bind_text(&record_form, |f, v| f.description = v)) }
                        { input_field("Valor", "text", &record_form.amount, bind_text(&record_form, |f, v| f.amount = v)) }
                        { input_field("Início", "date", &record_form.start, bind_text(&record_form, |f, v| f.start = v)) }
                        { select_field("Frequência", &frequency, record_frequencies, bind_select(&record_form, |f, v| f.recurrence.frequency = v)) }
                        if matches!(frequency.as_str(), "mensal" | "semanal") {
                            { input_field("Repetir a cada", "number", &record_form.recurrence.interval, bind_text(&record_form, |f, v| f.recurrence.interval = v)) }
                        }
                        if frequency == "semanal" {
                            { select_field("Dia da semana", &record_form.recurrence.weekday, weekday_options(), bind_select(&record_form, |f, v| f.recurrence.weekday = v)) }
                        }
                        if frequency == "parcela" {
                            { input_field("Parcela no início", "number", &record_form.recurrence.current, bind_text(&record_form, |f, v| f.recurrence.current = v)) }
                            { input_field("Total de parcelas", "number", &record_form.recurrence.total, bind_text(&record_form, |f, v| f.recurrence.total = v)) }
                        }
                        { check_field("Ativo", record_form.active, bind_check(&record_form, |f, v| f.active = v)) }
                    </Modal>
                }
            </>
        },
    )
}
