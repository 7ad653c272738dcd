use fincontrol_frontend::config::load_settings;
use fincontrol_frontend::logging;
use fincontrol_frontend::ui::App;

fn main() {
    logging::init(&load_settings());
    yew::Renderer::<App>::new().render();
}
