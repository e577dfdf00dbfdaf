use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use bevy::window::{PrimaryWindow, WindowResized};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::args::seeded_rng;
use crate::canvas::{canvas_to_world, Canvas};
use crate::engine::{EngineState, FloatingHearts};
use crate::frame_loop::FrameLoop;
use crate::heart_shape::heart_mesh;
use crate::keyboard::CardCommand;
use crate::particle::Heart;

/// Hearts sit behind the confetti; the UI is drawn on top of both.
const HEARTS_Z: f32 = -10.0;
const RNG_STREAM: u64 = 1;

/// Mounts the floating-hearts background on the primary window.
pub struct FloatingHeartsPlugin {
    pub hearts: usize,
    pub seed: Option<u64>,
}

impl Plugin for FloatingHeartsPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(FloatingHearts::new(self.hearts))
            .insert_resource(HeartsRng(seeded_rng(self.seed, RNG_STREAM)))
            .init_resource::<FrameLoop>()
            .init_resource::<HeartSlots>()
            .add_systems(Startup, (load_heart_mesh, mount_hearts).chain())
            .add_systems(
                Update,
                (
                    toggle_hearts,
                    resize_hearts.run_if(listening_for_resize),
                    draw_hearts.run_if(frame_requested),
                )
                    .chain(),
            )
            .add_systems(Last, unmount_on_exit);
    }
}

#[derive(Resource)]
struct HeartsRng(StdRng);

#[derive(Resource)]
struct HeartMesh(Handle<Mesh>);

/// Entities drawing each heart slot, indexed by slot.
#[derive(Resource, Default)]
struct HeartSlots(Vec<Entity>);

#[derive(Component)]
struct HeartSlot;

fn heart_transform(heart: &Heart, surface: Vec2, slot: usize) -> Transform {
    let center = canvas_to_world(heart.position, surface);
    Transform {
        // Slight per-slot depth keeps overlapping translucent hearts from flickering.
        translation: center.extend(HEARTS_Z + slot as f32 * 0.001),
        // Canvas rotation is clockwise with y down; world z rotation is counter-clockwise.
        rotation: Quat::from_rotation_z(-heart.rotation),
        scale: Vec3::new(heart.scale(), heart.scale(), 1.0),
    }
}

/// Draws hearts by moving the retained mesh entity of each slot.
struct SlotCanvas<'a, 'w, 's, 't> {
    slots: &'a [Entity],
    transforms: &'a mut Query<'w, 's, &'t mut Transform, With<HeartSlot>>,
    surface: Vec2,
}

impl Canvas for SlotCanvas<'_, '_, '_, '_> {
    fn clear(&mut self, size: Vec2) {
        // Nothing to wipe: every slot is overwritten by `fill_heart` in the same tick.
        self.surface = size;
    }

    fn fill_heart(&mut self, slot: usize, heart: &Heart) {
        let Some(entity) = self.slots.get(slot) else {
            return;
        };
        if let Ok(mut transform) = self.transforms.get_mut(*entity) {
            *transform = heart_transform(heart, self.surface, slot);
        }
    }
}

#[derive(SystemParam)]
struct HeartsMount<'w, 's> {
    commands: Commands<'w, 's>,
    hearts: ResMut<'w, FloatingHearts>,
    frames: ResMut<'w, FrameLoop>,
    slots: ResMut<'w, HeartSlots>,
    rng: ResMut<'w, HeartsRng>,
    mesh: Res<'w, HeartMesh>,
    materials: ResMut<'w, Assets<ColorMaterial>>,
    window: Query<'w, 's, &'static Window, With<PrimaryWindow>>,
}

impl HeartsMount<'_, '_> {
    fn mount(&mut self) {
        if self.hearts.state() == EngineState::Active {
            return;
        }
        let viewport = self.window.single().ok().map(|w| Vec2::new(w.width(), w.height()));
        let rng = StdRng::from_rng(&mut self.rng.0);
        if let Err(e) = self.hearts.start(viewport, rng, &mut *self.frames) {
            warn!("Floating hearts disabled: {e}");
            return;
        }

        let Some(field) = self.hearts.field() else {
            return;
        };
        for (slot, heart) in field.hearts().iter().enumerate() {
            let entity = self
                .commands
                .spawn((
                    HeartSlot,
                    Mesh2d(self.mesh.0.clone()),
                    MeshMaterial2d(self.materials.add(heart.fill_color())),
                    heart_transform(heart, field.bounds(), slot),
                ))
                .id();
            self.slots.0.push(entity);
        }
        debug!("{field:?}");
    }

    fn unmount(&mut self) {
        self.hearts.stop(&mut *self.frames);
        for entity in self.slots.0.drain(..) {
            self.commands.entity(entity).despawn();
        }
    }
}

fn load_heart_mesh(mut commands: Commands, mut meshes: ResMut<Assets<Mesh>>) {
    commands.insert_resource(HeartMesh(meshes.add(heart_mesh())));
}

fn mount_hearts(mut mount: HeartsMount) {
    mount.mount();
}

fn toggle_hearts(mut card_commands: MessageReader<CardCommand>, mut mount: HeartsMount) {
    for command in card_commands.read() {
        if *command != CardCommand::ToggleHearts {
            continue;
        }
        match mount.hearts.state() {
            EngineState::Active => mount.unmount(),
            EngineState::Inactive => mount.mount(),
        }
    }
}

fn unmount_on_exit(mut exit: MessageReader<AppExit>, mut mount: HeartsMount) {
    if exit.read().next().is_some() {
        mount.unmount();
    }
}

fn listening_for_resize(frames: Res<FrameLoop>) -> bool {
    frames.resize_listener_count() > 0
}

fn frame_requested(frames: Res<FrameLoop>) -> bool {
    frames.is_pending()
}

fn resize_hearts(
    mut resized: MessageReader<WindowResized>,
    primary: Query<(), With<PrimaryWindow>>,
    mut hearts: ResMut<FloatingHearts>,
) {
    for event in resized.read() {
        if primary.contains(event.window) {
            hearts.on_resize(Vec2::new(event.width, event.height));
        }
    }
}

fn draw_hearts(
    mut hearts: ResMut<FloatingHearts>,
    mut frames: ResMut<FrameLoop>,
    slots: Res<HeartSlots>,
    mut transforms: Query<&mut Transform, With<HeartSlot>>,
) {
    let Some(request) = frames.take_due() else {
        return;
    };
    let mut canvas = SlotCanvas {
        slots: &slots.0,
        transforms: &mut transforms,
        surface: Vec2::ZERO,
    };
    hearts.on_frame(request, &mut *frames, &mut canvas);
}
