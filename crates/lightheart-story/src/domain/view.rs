//! Reader-facing projection of a scene.

use serde::Serialize;

use super::scene::Scene;

/// Heading used when a scene has no title of its own.
pub const DEFAULT_TITLE: &str = "光之心森林冒险互动故事";

/// Notice shown in place of choices on a terminal scene.
pub const ENDING_NOTICE: &str = "冒险暂时告一段落啦，请期待下一集！";

const SENTENCE_TERMINATORS: [char; 5] = ['。', '！', '？', '!', '?'];

/// Everything needed to present one scene, independent of session state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SceneView {
    /// The scene identifier.
    pub scene_id: String,
    /// Scene title, or [`DEFAULT_TITLE`].
    pub title: String,
    /// Anchor for the heading element.
    pub heading_id: String,
    /// Anchor for the narrative body.
    pub description_id: String,
    /// Narrative text split into sentence-sized paragraphs.
    pub paragraphs: Vec<String>,
    /// Absolute path of the background image.
    pub image_src: String,
    /// Background image description.
    pub image_alt: String,
    /// Whether the image should be loaded eagerly (root scene only).
    pub eager_image: bool,
    /// Shown when the scene has no choices.
    pub ending_notice: Option<&'static str>,
}

impl SceneView {
    /// Projects `scene`. `is_root` marks the story's first scene.
    #[must_use]
    pub fn new(scene: &Scene, is_root: bool) -> Self {
        let title = scene
            .title
            .clone()
            .unwrap_or_else(|| DEFAULT_TITLE.to_owned());
        let image_alt = scene
            .image_alt
            .clone()
            .unwrap_or_else(|| format!("{title}场景插画"));
        let heading_id = format!("scene-heading-{}", scene.id);

        Self {
            scene_id: scene.id.clone(),
            description_id: format!("{heading_id}-description"),
            heading_id,
            paragraphs: split_paragraphs(&scene.text),
            image_src: format!("/{}", scene.bg.trim_start_matches('/')),
            image_alt,
            title,
            eager_image: is_root,
            ending_notice: scene.is_terminal().then_some(ENDING_NOTICE),
        }
    }
}

/// Splits narrative text after each sentence terminator, keeping the
/// terminator with its sentence. Text without any non-blank segment is
/// returned whole.
#[must_use]
pub fn split_paragraphs(text: &str) -> Vec<String> {
    let mut paragraphs = Vec::new();
    let mut current = String::new();

    for ch in text.chars() {
        current.push(ch);
        if SENTENCE_TERMINATORS.contains(&ch) {
            push_trimmed(&mut paragraphs, &current);
            current.clear();
        }
    }
    push_trimmed(&mut paragraphs, &current);

    if paragraphs.is_empty() {
        paragraphs.push(text.to_owned());
    }
    paragraphs
}

fn push_trimmed(paragraphs: &mut Vec<String>, segment: &str) {
    let trimmed = segment.trim();
    if !trimmed.is_empty() {
        paragraphs.push(trimmed.to_owned());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::scene::Choice;

    fn bird_scene() -> Scene {
        Scene {
            id: "forest-start".to_owned(),
            title: None,
            text: "莱恩和米拉走进镜之森林。一只小鸟被黑雾包围了！你会怎么做？".to_owned(),
            bg: "bg/scene1.png".to_owned(),
            image_alt: None,
            choices: vec![Choice {
                label: "帮助小鸟".to_owned(),
                next: "forest-help".to_owned(),
                feedback: Some("你的善意让小鸟安心了".to_owned()),
            }],
        }
    }

    #[test]
    fn test_split_paragraphs_keeps_terminators_with_sentences() {
        let paragraphs = split_paragraphs("第一句。 第二句！Third? tail");

        assert_eq!(paragraphs, vec!["第一句。", "第二句！", "Third?", "tail"]);
    }

    #[test]
    fn test_split_paragraphs_returns_text_whole_when_nothing_survives() {
        assert_eq!(split_paragraphs("   "), vec!["   "]);
    }

    #[test]
    fn test_view_uses_default_title_and_derived_alt() {
        // Arrange
        let scene = bird_scene();

        // Act
        let view = SceneView::new(&scene, true);

        // Assert
        assert_eq!(view.title, DEFAULT_TITLE);
        assert_eq!(view.image_alt, format!("{DEFAULT_TITLE}场景插画"));
        assert_eq!(view.image_src, "/bg/scene1.png");
        assert_eq!(view.heading_id, "scene-heading-forest-start");
        assert_eq!(view.description_id, "scene-heading-forest-start-description");
        assert_eq!(view.paragraphs.len(), 3);
        assert!(view.eager_image);
        assert_eq!(view.ending_notice, None);
    }

    #[test]
    fn test_view_of_terminal_scene_carries_ending_notice() {
        // Arrange
        let mut scene = bird_scene();
        scene.title = Some("森林尽头".to_owned());
        scene.image_alt = Some("金色的森林".to_owned());
        scene.choices.clear();

        // Act
        let view = SceneView::new(&scene, false);

        // Assert
        assert_eq!(view.title, "森林尽头");
        assert_eq!(view.image_alt, "金色的森林");
        assert!(!view.eager_image);
        assert_eq!(view.ending_notice, Some(ENDING_NOTICE));
    }
}
