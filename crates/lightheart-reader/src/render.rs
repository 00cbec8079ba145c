//! Plain-text rendering of session views.

use lightheart_session::application::session::SessionView;

/// Series name shown above every scene.
pub const KICKER: &str = "光之心森林冒险";

/// Message shown for an address that names no scene.
pub const NOT_FOUND_MESSAGE: &str = "抱歉，没找到这个场景。";

const HINT: &str = "输入选项编号做出选择 · b 返回上一页 · q 退出";

/// Renders the scene, any pending feedback, and the numbered choices.
#[must_use]
pub fn render_view(view: &SessionView) -> String {
    let scene = &view.scene;
    let mut lines = vec![
        format!("── {KICKER} ──"),
        format!("【{}】", scene.title),
        format!("[{}]", scene.image_alt),
        String::new(),
    ];
    lines.extend(scene.paragraphs.iter().cloned());
    lines.push(String::new());

    if let Some(feedback) = &view.feedback {
        lines.push(format!("✦ {feedback}"));
        lines.push(String::new());
    }

    if let Some(notice) = scene.ending_notice {
        lines.push(notice.to_owned());
    } else {
        lines.extend(view.choices.iter().enumerate().map(|(index, control)| {
            let marker = if control.disabled { "·" } else { " " };
            format!("{marker} {}. {}", index + 1, control.label)
        }));
    }
    lines.push(format!("({HINT})"));

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Renders the not-found page for `path`, with the way back to the start.
#[must_use]
pub fn render_not_found(path: &str) -> String {
    format!("{NOT_FOUND_MESSAGE}\n({path})\n返回故事开头：START_PATH=/\n")
}
