use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::api;
use crate::forms::CategoryForm;
use crate::models::{Category, CategoryKind};
use crate::ui::components::{
    alert, bind_select, bind_text, confirm, input_field, page_shell, primary_button,
    report_error, select_field, use_api, use_list, FormMode, Modal,
};

const DEFAULT_COLOR: &str = "#1D617A";

#[function_component(CategoriesPage)]
pub fn categories_page() -> Html {
    let api = use_api();
    let version = use_state(|| 0u32);
    let categories = use_list::<Category>(api::CATEGORIES.to_string(), *version);

    let mode = use_state(|| FormMode::Closed);
    let form = use_state(CategoryForm::default);
    let saving = use_state(|| false);

    let open_new = {
        let mode = mode.clone();
        let form = form.clone();
        move |kind: &'static str| {
            let mode = mode.clone();
            let form = form.clone();
            Callback::from(move |_: MouseEvent| {
                form.set(CategoryForm {
                    name: String::new(),
                    kind: kind.to_string(),
                    color: DEFAULT_COLOR.to_string(),
                });
                mode.set(FormMode::Create);
            })
        }
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
                match api.save::<_, Category>(api::CATEGORIES, record.id, &record).await {
                    Ok(_) => {
                        mode.set(FormMode::Closed);
                        version.set(*version + 1);
                    }
                    Err(err) => report_error("Não foi possível salvar a categoria", &err),
                }
                saving.set(false);
            });
        })
    };

    let edit = {
        let mode = mode.clone();
        let form = form.clone();
        move |category: &Category| {
            let mode = mode.clone();
            let form = form.clone();
            let category = category.clone();
            Callback::from(move |_: MouseEvent| {
                if let Some(id) = category.id {
                    form.set(CategoryForm::from_record(&category));
                    mode.set(FormMode::Edit(id));
                }
            })
        }
    };

    let remove = {
        let api = api.clone();
        let version = version.clone();
        move |category: &Category| {
            let api = api.clone();
            let version = version.clone();
            let id = category.id;
            let name = category.name.clone();
            Callback::from(move |_: MouseEvent| {
                let Some(id) = id else { return };
                if !confirm(&format!("Excluir a categoria \"{}\"?", name)) {
                    return;
                }
                let api = api.clone();
                let version = version.clone();
                spawn_local(async move {
                    match api.delete(api::CATEGORIES, id).await {
                        Ok(()) => version.set(*version + 1),
                        Err(err) => report_error("Não foi possível excluir a categoria", &err),
                    }
                });
            })
        }
    };

    let column = |kind: CategoryKind| -> Html {
        let items: Vec<&Category> = categories
            .as_deref()
            .unwrap_or(&[])
            .iter()
            .filter(|c| c.kind == kind)
            .collect();
        html! {
            <div class="bg-card rounded-[10px] shadow-sm border border-border p-5">
                <h2 class="text-sm font-bold text-[#173E63] mb-3">{ kind.label() }</h2>
                if categories.is_none() {
                    <p class="text-sm text-muted-foreground">{"Carregando..."}</p>
                } else if items.is_empty() {
                    <p class="text-sm text-muted-foreground">{"Nenhuma categoria."}</p>
                }
                <ul class="space-y-2">
                    { for items.into_iter().map(|category| {
                        let color = category.color.clone().unwrap_or_else(|| DEFAULT_COLOR.to_string());
                        html! {
                            <li class="flex items-center justify-between text-sm">
                                <span class="flex items-center gap-2">
                                    <span class="inline-block w-3 h-3 rounded-full" style={format!("background:{}", color)}></span>
                                    { category.name.clone() }
                                </span>
                                <span class="space-x-2">
                                    <button onclick={edit(category)} class="text-primary">{"Editar"}</button>
                                    <button onclick={remove(category)} class="text-red-600">{"Excluir"}</button>
                                </span>
                            </li>
                        }
                    }) }
                </ul>
            </div>
        }
    };

    let kind_options = vec![
        ("despesa".to_string(), "Despesa".to_string()),
        ("receita".to_string(), "Receita".to_string()),
    ];

    page_shell(
        "Categorias",
        html! {
            <div class="flex gap-2">
                { primary_button("Despesa", open_new("despesa")) }
                { primary_button("Receita", open_new("receita")) }
            </div>
        },
        html! {
            <>
                <div class="grid grid-cols-1 md:grid-cols-2 gap-6">
                    { column(CategoryKind::Despesa) }
                    { column(CategoryKind::Receita) }
                </div>

                if mode.is_open() {
                    <Modal title={mode.title("Nova categoria", "Editar categoria")} on_close={on_close} on_save={on_save} saving={*saving}>
                        { input_field("Nome", "text", &form.name, bind_text(&form, |f, v| f.name = v)) }
                        { select_field("Tipo", &form.kind, kind_options, bind_select(&form, |f, v| f.kind = v)) }
                        { input_field("Cor", "color", &form.color, bind_text(&form, |f, v| f.color = v)) }
                    </Modal>
                }
            </>
        },
    )
}
