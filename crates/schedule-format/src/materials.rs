//! Paginated course-material list.

use campus_core::{InlineButton, InlineKeyboard, Material, OutgoingMessage, Role};

use crate::labels::escape_html;
use crate::pagination::Page;

/// Callback payload prefix of material page buttons (`mat:<page>`).
pub const MATERIALS_CALLBACK_PREFIX: &str = "mat:";

fn page_button(label: &str, page: usize) -> InlineButton {
    InlineButton::new(label, format!("{}{}", MATERIALS_CALLBACK_PREFIX, page))
}

/// Renders one page of materials with prev/next buttons where a neighbour page exists.
/// Numbering continues across pages.
pub fn render_materials(page: &Page<'_, Material>, role: Role) -> OutgoingMessage {
    if page.total_pages == 0 {
        return OutgoingMessage::text("📚 Материалов пока нет");
    }

    let mut text = format!(
        "<b>📚 Материалы</b> (стр. {}/{})\n",
        page.page + 1,
        page.total_pages
    );
    for (i, material) in page.items.iter().enumerate() {
        text.push_str(&format!(
            "\n{}. <b>{}</b> — {}\n",
            page.offset() + i + 1,
            escape_html(&material.title),
            escape_html(&material.course_name)
        ));
        if !material.description.is_empty() {
            text.push_str(&format!("   {}\n", escape_html(&material.description)));
        }
        if !material.file_url.is_empty() {
            text.push_str(&format!("   🔗 {}\n", escape_html(&material.file_url)));
        }
        if role == Role::Teacher {
            text.push_str(&format!("   👥 {}\n", escape_html(&material.group_name)));
        }
    }

    let mut nav = Vec::new();
    if page.has_previous() {
        nav.push(page_button("◀", page.page - 1));
    }
    if page.has_next() {
        nav.push(page_button("▶", page.page + 1));
    }

    OutgoingMessage::text(text)
        .with_keyboard(InlineKeyboard::new().row(nav))
        .html()
}

/// Page index from a `mat:<page>` payload.
pub fn parse_page_callback(data: &str) -> Option<usize> {
    data.strip_prefix(MATERIALS_CALLBACK_PREFIX)?.parse().ok()
}
