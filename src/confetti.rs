use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use rand::rngs::StdRng;

use crate::args::seeded_rng;
use crate::canvas::canvas_to_world;
use crate::celebration::{BurstSchedule, Confetto, CONFETTO_SIZE};

const CONFETTI_Z: f32 = 10.0;
const RNG_STREAM: u64 = 3;

pub struct ConfettiPlugin {
    pub seed: Option<u64>,
}

impl Plugin for ConfettiPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(Celebration::new(seeded_rng(self.seed, RNG_STREAM)))
            .add_systems(Update, (fire_bursts.run_if(celebrating), animate_confetti).chain());
    }
}

/// The running celebration, if any.
#[derive(Resource)]
pub struct Celebration {
    schedule: Option<BurstSchedule>,
    rng: StdRng,
}

impl Celebration {
    pub fn new(rng: StdRng) -> Celebration {
        Celebration { schedule: None, rng }
    }

    pub fn is_running(&self) -> bool {
        self.schedule.is_some()
    }

    pub fn start(&mut self) {
        info!("Celebration started");
        self.schedule = Some(BurstSchedule::default());
    }

    pub fn cancel(&mut self) {
        if self.schedule.take().is_some() {
            info!("Celebration cancelled");
        }
    }
}

#[derive(Component)]
struct ConfettoSprite(Confetto);

fn celebrating(celebration: Res<Celebration>) -> bool {
    celebration.is_running()
}

fn fire_bursts(
    mut commands: Commands,
    time: Res<Time>,
    mut celebration: ResMut<Celebration>,
    window: Query<&Window, With<PrimaryWindow>>,
) {
    let Celebration { schedule, rng } = &mut *celebration;
    let Some(running) = schedule.as_mut() else {
        return;
    };
    let bursts = running.advance(time.delta(), rng);
    if running.is_finished() {
        debug!("Celebration finished");
        *schedule = None;
    }

    let Ok(window) = window.single() else {
        return;
    };
    let surface = Vec2::new(window.width(), window.height());
    for burst in bursts {
        let origin = burst.origin * surface;
        for _ in 0..burst.particle_count {
            let confetto = Confetto::launch(origin, rng);
            commands.spawn((
                Sprite::from_color(confetto.color, CONFETTO_SIZE),
                Transform::from_translation(canvas_to_world(origin, surface).extend(CONFETTI_Z)),
                ConfettoSprite(confetto),
            ));
        }
    }
}

fn animate_confetti(
    mut commands: Commands,
    window: Query<&Window, With<PrimaryWindow>>,
    mut pieces: Query<(Entity, &mut ConfettoSprite, &mut Transform, &mut Sprite)>,
) {
    let surface = window
        .single()
        .map(|w| Vec2::new(w.width(), w.height()))
        .unwrap_or(Vec2::ZERO);

    for (entity, mut piece, mut transform, mut sprite) in &mut pieces {
        let confetto = &mut piece.0;
        if !confetto.update() {
            commands.entity(entity).despawn();
            continue;
        }
        // The piece spans from its position to its wobble point; canvas y points down.
        let wobble = confetto.wobble_offset();
        let center = confetto.position + wobble / 2.0;
        transform.translation = canvas_to_world(center, surface).extend(CONFETTI_Z);
        transform.rotation = Quat::from_rotation_z(-wobble.to_angle());
        transform.scale.y = confetto.face();
        sprite.color = confetto.color.with_alpha(confetto.opacity());
    }
}
