//! The card itself: the question, the two buttons and the "yay" screen.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use rand::rngs::StdRng;

use crate::args::seeded_rng;
use crate::confetti::Celebration;
use crate::dodge::Prompt;
use crate::keyboard::CardCommand;

const RNG_STREAM: u64 = 2;

const GRAY_600: Color = Color::srgb(0.294, 0.333, 0.388);
const GRAY_800: Color = Color::srgb(0.122, 0.161, 0.216);
const PINK_400: Color = Color::srgb(0.957, 0.447, 0.714);
const PINK_500: Color = Color::srgb(0.925, 0.282, 0.600);
const PINK_600: Color = Color::srgb(0.859, 0.153, 0.467);
const CARD_BACKGROUND: Color = Color::srgba(1.0, 1.0, 1.0, 0.15);
const NO_BACKGROUND: Color = Color::srgba(1.0, 1.0, 1.0, 0.8);

pub struct PromptPlugin {
    pub recipient: String,
    pub seed: Option<u64>,
}

impl Plugin for PromptPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Prompt>()
            .insert_resource(PromptRng(seeded_rng(self.seed, RNG_STREAM)))
            .insert_resource(Recipient(self.recipient.clone()))
            .add_systems(Startup, spawn_card)
            .add_systems(
                Update,
                (press_yes, dodge_no, press_start_over, apply_card_commands, show_prompt).chain(),
            );
    }
}

#[derive(Resource)]
struct PromptRng(StdRng);

#[derive(Resource)]
struct Recipient(String);

#[derive(Component)]
struct AskingCard;

#[derive(Component)]
struct AcceptedCard;

#[derive(Component)]
struct YesButton;

/// Both "No" buttons: the one sitting in the button row and the one floating around.
#[derive(Component)]
struct NoButton;

/// The "No" button in the row. Hidden, not removed, while the floating one is shown,
/// so the row keeps its layout.
#[derive(Component)]
struct InRowNo;

#[derive(Component)]
struct FloatingNo;

#[derive(Component)]
struct StartOverButton;

fn card_node() -> Node {
    Node {
        width: Val::Percent(100.0),
        max_width: Val::Px(448.0),
        padding: UiRect::all(Val::Px(40.0)),
        flex_direction: FlexDirection::Column,
        align_items: AlignItems::Center,
        ..default()
    }
}

fn button_node() -> Node {
    Node {
        padding: UiRect::axes(Val::Px(40.0), Val::Px(16.0)),
        justify_content: JustifyContent::Center,
        align_items: AlignItems::Center,
        ..default()
    }
}

fn text(value: impl Into<String>, size: f32, color: Color) -> impl Bundle {
    (Text::new(value), TextFont::from_font_size(size), TextColor(color))
}

fn spawn_button(
    parent: &mut ChildSpawnerCommands,
    marker: impl Bundle,
    node: Node,
    label: &str,
    background: Color,
    color: Color,
) {
    parent
        .spawn((marker, Button, node, BackgroundColor(background)))
        .with_children(|button| {
            button.spawn(text(label, 20.0, color));
        });
}

fn spawn_card(mut commands: Commands, recipient: Res<Recipient>) {
    commands
        .spawn(Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            justify_content: JustifyContent::Center,
            align_items: AlignItems::Center,
            ..default()
        })
        .with_children(|root| {
            root.spawn((AskingCard, card_node(), BackgroundColor(CARD_BACKGROUND)))
                .with_children(|card| {
                    card.spawn(text(format!("{},", recipient.0), 44.0, GRAY_800));
                    card.spawn((
                        text("will you be my Valentine?", 32.0, PINK_600),
                        Node {
                            margin: UiRect::bottom(Val::Px(32.0)),
                            ..default()
                        },
                    ));
                    card.spawn(Node {
                        flex_direction: FlexDirection::Row,
                        align_items: AlignItems::Center,
                        justify_content: JustifyContent::Center,
                        column_gap: Val::Px(24.0),
                        min_height: Val::Px(80.0),
                        ..default()
                    })
                    .with_children(|row| {
                        spawn_button(row, YesButton, button_node(), "Yes!", PINK_500, Color::WHITE);
                        spawn_button(row, (NoButton, InRowNo), button_node(), "No", NO_BACKGROUND, GRAY_600);
                    });
                    card.spawn((
                        text("\"No\" seems a bit shy...", 14.0, PINK_500.with_alpha(0.8)),
                        Node {
                            margin: UiRect::top(Val::Px(32.0)),
                            ..default()
                        },
                    ));
                });

            root.spawn((
                AcceptedCard,
                Node {
                    display: Display::None,
                    ..card_node()
                },
                BackgroundColor(CARD_BACKGROUND),
            ))
            .with_children(|card| {
                card.spawn((
                    text("YAY!", 56.0, PINK_600),
                    Node {
                        margin: UiRect::bottom(Val::Px(24.0)),
                        ..default()
                    },
                ));
                card.spawn(text("Best decision ever!", 24.0, PINK_600));
                card.spawn(text("See you on the 14th, beautiful!", 16.0, GRAY_600));
                spawn_button(
                    card,
                    StartOverButton,
                    Node {
                        margin: UiRect::top(Val::Px(32.0)),
                        ..button_node()
                    },
                    "START OVER",
                    Color::NONE,
                    PINK_400,
                );
            });

            // Positioned against the full-window root, so left/top are viewport coordinates.
            spawn_button(
                root,
                (NoButton, FloatingNo, GlobalZIndex(9999)),
                Node {
                    display: Display::None,
                    position_type: PositionType::Absolute,
                    ..button_node()
                },
                "No",
                NO_BACKGROUND,
                GRAY_600,
            );

            root.spawn((
                text("MADE WITH LOVE", 12.0, PINK_400.with_alpha(0.6)),
                Node {
                    position_type: PositionType::Absolute,
                    bottom: Val::Px(24.0),
                    ..default()
                },
            ));
        });
}

fn accept(prompt: &mut Prompt, celebration: &mut Celebration) {
    if prompt.accept() {
        celebration.start();
    }
}

fn start_over(prompt: &mut Prompt, celebration: &mut Celebration) {
    info!("Starting over");
    prompt.reset();
    celebration.cancel();
}

fn press_yes(
    interactions: Query<&Interaction, (Changed<Interaction>, With<YesButton>)>,
    mut prompt: ResMut<Prompt>,
    mut celebration: ResMut<Celebration>,
) {
    if interactions.iter().any(|i| *i == Interaction::Pressed) {
        accept(&mut prompt, &mut celebration);
    }
}

fn press_start_over(
    interactions: Query<&Interaction, (Changed<Interaction>, With<StartOverButton>)>,
    mut prompt: ResMut<Prompt>,
    mut celebration: ResMut<Celebration>,
) {
    if interactions.iter().any(|i| *i == Interaction::Pressed) {
        start_over(&mut prompt, &mut celebration);
    }
}

/// Hover, touch and click all send the "No" button somewhere else.
fn dodge_no(
    interactions: Query<(&Interaction, &ComputedNode), (Changed<Interaction>, With<NoButton>)>,
    window: Query<&Window, With<PrimaryWindow>>,
    mut prompt: ResMut<Prompt>,
    mut rng: ResMut<PromptRng>,
) {
    let Ok(window) = window.single() else {
        return;
    };
    let viewport = Vec2::new(window.width(), window.height());

    for (interaction, node) in &interactions {
        if *interaction == Interaction::None {
            continue;
        }
        let size = node.size() * node.inverse_scale_factor();
        let button = (size.x > 0.0 && size.y > 0.0).then_some(size);
        if let Some(position) = prompt.evade(viewport, button, &mut rng.0) {
            debug!("No button dodged to {position}");
        }
    }
}

fn apply_card_commands(
    mut card_commands: MessageReader<CardCommand>,
    mut prompt: ResMut<Prompt>,
    mut celebration: ResMut<Celebration>,
) {
    for command in card_commands.read() {
        match command {
            CardCommand::Accept => accept(&mut prompt, &mut celebration),
            CardCommand::StartOver => start_over(&mut prompt, &mut celebration),
            CardCommand::ToggleHearts => {}
        }
    }
}

fn show_prompt(
    prompt: Res<Prompt>,
    mut nodes: Query<
        (&mut Node, Has<AskingCard>, Has<AcceptedCard>, Has<FloatingNo>),
        Or<(With<AskingCard>, With<AcceptedCard>, With<FloatingNo>)>,
    >,
    mut in_row_no: Query<&mut Visibility, With<InRowNo>>,
) {
    if !prompt.is_changed() {
        return;
    }
    let shown = |visible: bool| if visible { Display::Flex } else { Display::None };

    for (mut node, asking, accepted, floating) in &mut nodes {
        if asking {
            node.display = shown(!prompt.accepted());
        } else if accepted {
            node.display = shown(prompt.accepted());
        } else if floating {
            match prompt.evasive_position() {
                Some(position) => {
                    node.display = Display::Flex;
                    node.left = Val::Px(position.x);
                    node.top = Val::Px(position.y);
                }
                None => node.display = Display::None,
            }
        }
    }

    for mut visibility in &mut in_row_no {
        *visibility = if prompt.evasive_position().is_some() {
            Visibility::Hidden
        } else {
            Visibility::Inherited
        };
    }
}
