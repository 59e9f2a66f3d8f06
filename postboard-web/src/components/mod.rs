pub(crate) mod loading;
pub(crate) mod post_card;
pub(crate) mod post_form;
pub(crate) mod post_list;
