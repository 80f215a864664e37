use bevy::prelude::*;

use crate::tools::placement::session::PlacementSession;

#[derive(Component)]
pub struct TransitionCoverNode;

pub fn spawn_cover_node(mut commands: Commands) {
    commands.spawn((
        Node {
            position_type: PositionType::Absolute,
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            ..default()
        },
        BackgroundColor(Color::BLACK.with_alpha(0.0)),
        // Above every overlay, including hints and buttons.
        GlobalZIndex(i32::MAX),
        Visibility::Hidden,
        TransitionCoverNode,
    ));
}

/// Mirror the session cover's opacity onto the full-screen node.
pub fn update_cover_node(
    session: Res<PlacementSession>,
    mut nodes: Query<(&mut BackgroundColor, &mut Visibility), With<TransitionCoverNode>>,
) {
    let opacity = session.cover().opacity();
    for (mut background, mut visibility) in &mut nodes {
        background.0 = Color::BLACK.with_alpha(opacity);
        let desired = if opacity > 0.0 {
            Visibility::Visible
        } else {
            Visibility::Hidden
        };
        if *visibility != desired {
            *visibility = desired;
        }
    }
}
