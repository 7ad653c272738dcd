use yew::prelude::*;

use crate::api::ApiClient;
use crate::config::{save_settings, AppSettings, LOG_LEVELS};
use crate::ui::components::{alert, bind_select, bind_text, input_field, page_shell, select_field};

#[function_component(SettingsPage)]
pub fn settings_page() -> Html {
    let context = use_context::<UseStateHandle<AppSettings>>();
    let current = context
        .as_ref()
        .map(|settings| (**settings).clone())
        .unwrap_or_default();
    let draft = use_state(move || current);

    let on_save = {
        let draft = draft.clone();
        Callback::from(move |_: MouseEvent| {
            let settings = AppSettings {
                api_base_url: draft.api_base_url.trim().trim_end_matches('/').to_string(),
                log_level: draft.log_level.clone(),
            };
            save_settings(&settings);
            tracing::info!(api = %settings.api_base_url, level = %settings.log_level, "settings saved");
            if let Some(context) = context.as_ref() {
                context.set(settings);
            }
            alert("Configurações salvas. O nível de log vale a partir da próxima abertura.");
        })
    };

    let on_reset = {
        let draft = draft.clone();
        Callback::from(move |_: MouseEvent| draft.set(AppSettings::default()))
    };

    let level_options: Vec<(String, String)> = LOG_LEVELS
        .iter()
        .map(|level| (level.to_string(), level.to_string()))
        .collect();
    let resolved = ApiClient::from_settings(&draft).url("/api");

    page_shell(
        "Configurações",
        html! {},
        html! {
            <div class="bg-card rounded-[10px] shadow-sm border border-border p-5 max-w-xl space-y-4">
                { input_field("Endereço da API", "url", &draft.api_base_url, bind_text(&draft, |s, v| s.api_base_url = v)) }
                <p class="text-xs text-muted-foreground">
                    { format!("Requisições para {}", resolved) }
                    if draft.api_base_url.trim().is_empty() {
                        {" (mesma origem da página)"}
                    }
                </p>
                { select_field("Nível de log", &draft.log_level, level_options, bind_select(&draft, |s, v| s.log_level = v)) }
                <div class="flex gap-2">
                    <button onclick={on_save} class="bg-accent text-white px-4 py-2 rounded">{"Salvar"}</button>
                    <button onclick={on_reset} class="px-4 py-2 rounded border">{"Restaurar padrão"}</button>
                </div>
            </div>
        },
    )
}
