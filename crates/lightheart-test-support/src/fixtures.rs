//! Story fixtures shared across crate tests.

use lightheart_story::domain::graph::SceneGraph;
use lightheart_story::domain::scene::{Choice, Scene};

/// Feedback shown after choosing to help the bird.
pub const BIRD_FEEDBACK: &str = "你的善意让小鸟安心了";

fn choice(label: &str, next: &str, feedback: Option<&str>) -> Choice {
    Choice {
        label: label.to_owned(),
        next: next.to_owned(),
        feedback: feedback.map(str::to_owned),
    }
}

/// A four-scene forest story.
///
/// - `forest-start` (root): help the bird -> `forest-help` with feedback;
///   wander off -> `forest-xyz`, which does not exist.
/// - `forest-help`: a self-loop and a way back to the root.
/// - `forest-path`: leads on to the terminal `forest-end`.
///
/// # Panics
///
/// Never in practice; the fixture satisfies every graph invariant.
#[must_use]
pub fn forest_story() -> SceneGraph {
    SceneGraph::new(vec![
        Scene {
            id: "forest-start".to_owned(),
            title: Some("镜之森林".to_owned()),
            text: "莱恩和米拉走进镜之森林。一只小鸟被黑雾包围了！".to_owned(),
            bg: "bg/scene1.png".to_owned(),
            image_alt: None,
            choices: vec![
                choice("帮助小鸟", "forest-help", Some(BIRD_FEEDBACK)),
                choice("走向未知", "forest-xyz", None),
                choice("沿小路走", "forest-path", Some("你们踏上了小路")),
            ],
        },
        Scene {
            id: "forest-help".to_owned(),
            title: Some("温暖的光".to_owned()),
            text: "黑雾慢慢散开，小鸟唱起了歌。".to_owned(),
            bg: "bg/scene2.png".to_owned(),
            image_alt: Some("歌唱的小鸟".to_owned()),
            choices: vec![
                choice("再听一遍", "forest-help", None),
                choice("回到开头", "forest-start", None),
            ],
        },
        Scene {
            id: "forest-path".to_owned(),
            title: None,
            text: "小路通向森林深处。".to_owned(),
            bg: "bg/scene3.png".to_owned(),
            image_alt: None,
            choices: vec![choice("继续走", "forest-end", None)],
        },
        Scene {
            id: "forest-end".to_owned(),
            title: Some("森林尽头".to_owned()),
            text: "你们找到了光之心。".to_owned(),
            bg: "bg/scene4.png".to_owned(),
            image_alt: None,
            choices: Vec::new(),
        },
    ])
    .expect("forest fixture is a valid story")
}
