pub(crate) mod film_card;
pub(crate) mod pagination;
pub(crate) mod shell;
pub(crate) mod toast;
