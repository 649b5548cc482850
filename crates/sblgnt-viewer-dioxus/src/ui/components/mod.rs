pub mod book_header;
pub mod book_selector;
pub mod clause_panel;
pub mod reference_form;
pub mod status_panel;
pub mod verse_article;
pub mod verse_list;

pub use book_header::BookHeader;
pub use book_selector::BookSelectorView;
pub use clause_panel::ClausePanel;
pub use reference_form::ReferenceFormView;
pub use status_panel::StatusPanelView;
pub use verse_article::{VerseArticle, verse_dom_id};
pub use verse_list::VerseList;
