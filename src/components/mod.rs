pub mod api_key_form;
pub mod chat_panel;
pub mod detection_canvas;
pub mod detection_log;
pub mod sidebar;
pub mod status_badge;
