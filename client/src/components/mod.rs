pub mod ner_facetting;
pub mod sidebar_panel;
pub mod viewer_controls;
pub mod viewer_host;
