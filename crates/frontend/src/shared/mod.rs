pub mod api_utils;
pub mod detail_card;
pub mod entity_list;
pub mod form_modal;
pub mod icons;
pub mod modal_frame;
