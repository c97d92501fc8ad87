use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::collision;
use crate::config::GameConfig;
use crate::course::Course;
use crate::flight::{frame_scale, CameraRig, Ship};
use crate::hud;
use crate::input::InputState;
use crate::messages::MessageBoard;
use crate::particles::ParticleField;
use crate::session::{RingTally, Session};

const START_MESSAGE_SECONDS: f64 = 3.0;
const PLANET_MESSAGE_SECONDS: f64 = 5.0;
const RING_MESSAGE_SECONDS: f64 = 2.0;

/// Shortest distance a substep is allowed to cover.
const MIN_SUBSTEP_REACH: f32 = 0.25;
const MAX_SUBSTEPS: usize = 4096;

/// Something that happened during a frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RaceEvent {
    PlanetNearby { planet: usize },
    Crashed { planet: usize },
    RingCollected { ring: usize, remaining: usize },
    Won { elapsed: f64 },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameReport {
    pub events: Vec<RaceEvent>,
    pub particles_removed: usize,
}

/// All state of one session. The frame loop calls [`Race::step`] once per
/// rendered frame; nothing else mutates the simulation.
#[derive(Debug, Clone)]
pub struct Race {
    config: GameConfig,
    ship: Ship,
    camera: CameraRig,
    course: Course,
    particles: ParticleField,
    session: Session,
    messages: MessageBoard,
    rng: ChaCha8Rng,
    clock: f64,
}

impl Race {
    pub fn new(config: GameConfig) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(config.rng_seed);
        let course = Course::generate(&config.course, &mut rng);
        Self::build(config, course, rng)
    }

    /// Race over a hand-built course.
    pub fn with_course(config: GameConfig, course: Course) -> Self {
        let rng = ChaCha8Rng::seed_from_u64(config.rng_seed);
        Self::build(config, course, rng)
    }

    fn build(config: GameConfig, course: Course, rng: ChaCha8Rng) -> Self {
        let ship = Ship::default();
        let camera = CameraRig::follow(&ship, config.flight.camera_offset);
        let mut messages = MessageBoard::new();
        messages.show(
            hud::welcome_text(course.rings.len(), config.controls.start_key),
            None,
            0.0,
        );

        tracing::info!(
            variant = config.variant.as_str(),
            planets = course.planets.len(),
            rings = course.rings.len(),
            "race created"
        );

        Self {
            config,
            ship,
            camera,
            course,
            particles: ParticleField::new(),
            session: Session::new(),
            messages,
            rng,
            clock: 0.0,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn ship(&self) -> &Ship {
        &self.ship
    }

    pub fn camera(&self) -> &CameraRig {
        &self.camera
    }

    pub fn course(&self) -> &Course {
        &self.course
    }

    pub fn particles(&self) -> &ParticleField {
        &self.particles
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn messages(&self) -> &MessageBoard {
        &self.messages
    }

    /// Seconds of simulated time since the race was created.
    pub fn clock(&self) -> f64 {
        self.clock
    }

    pub fn total_rings(&self) -> usize {
        self.course.rings.len()
    }

    pub fn status_line(&self) -> String {
        hud::status_line(
            &self.session,
            self.total_rings(),
            self.clock,
            self.config.controls.start_key,
        )
    }

    /// Start the session. Returns false if it already started.
    pub fn press_start(&mut self) -> bool {
        if !self.session.start(self.clock) {
            return false;
        }
        tracing::info!(at = self.clock, "race started");
        self.messages
            .show(hud::started_text(), Some(START_MESSAGE_SECONDS), self.clock);
        true
    }

    pub fn dismiss_message(&mut self) {
        self.messages.dismiss();
    }

    /// Advance one frame of `dt` seconds. Once the session is over this does nothing.
    pub fn step(&mut self, input: &InputState, dt: f32) -> FrameReport {
        let mut report = FrameReport::default();
        if self.session.is_over() {
            return report;
        }

        let dt = if dt.is_finite() && dt >= 0.0 {
            dt
        } else {
            tracing::warn!(dt, "ignoring invalid frame delta");
            0.0
        };
        let scale = frame_scale(dt);
        let substeps = self.substeps_for(scale);
        let sub_dt = dt / substeps as f32;
        let sub_scale = scale / substeps as f32;

        for _ in 0..substeps {
            self.clock += sub_dt as f64;
            let now = self.clock;

            self.ship.steer(input.pointer, &self.config.flight, sub_scale);
            if self.session.is_running() {
                self.ship.thrust(input, &self.config.flight, sub_scale);
                self.ship.advance(sub_scale);
                self.resolve_contacts(now, &mut report.events);
            }
            if self.session.is_over() {
                break;
            }
        }
        let now = self.clock;
        self.camera = CameraRig::follow(&self.ship, self.config.flight.camera_offset);

        report.particles_removed =
            self.particles
                .update(scale, dt, now, self.config.effects.gravity);
        self.messages.tick(now);

        report
    }

    /// Split a frame so no substep moves the ship further than a ring's
    /// capture depth; long frames would otherwise jump over rings and planets.
    fn substeps_for(&self, scale: f32) -> usize {
        let reach = self.config.course.capture_depth.max(MIN_SUBSTEP_REACH);
        let travel = self.config.flight.max_speed * scale;
        ((travel / reach).ceil() as usize).clamp(1, MAX_SUBSTEPS)
    }

    fn resolve_contacts(&mut self, now: f64, events: &mut Vec<RaceEvent>) {
        let start_key = self.config.controls.start_key;
        let contacts = collision::scan(&self.course, self.ship.position, &self.config.course);

        if let Some(planet) = contacts.crashed {
            if self.session.crash(planet, now) {
                tracing::info!(planet, at = now, "crashed into planet");
                self.messages.show(hud::crashed_text(start_key), None, now);
                events.push(RaceEvent::Crashed { planet });
            }
            return;
        }

        if let Some(planet) = contacts.nearby_planet {
            let text = self.course.planets[planet].message.clone();
            self.messages.show(text, Some(PLANET_MESSAGE_SECONDS), now);
            events.push(RaceEvent::PlanetNearby { planet });
        }

        let total = self.course.rings.len();
        for ring in contacts.rings {
            if !self.session.is_running() || !self.course.rings[ring].collect() {
                continue;
            }
            let position = self.course.rings[ring].position;
            self.particles
                .spawn_explosion(position, &self.config.effects, now, &mut self.rng);

            match self.session.record_ring(total, now) {
                Some(RingTally::Remaining(remaining)) => {
                    tracing::info!(ring, remaining, "ring collected");
                    self.messages.show(
                        hud::ring_collected_text(remaining),
                        Some(RING_MESSAGE_SECONDS),
                        now,
                    );
                    events.push(RaceEvent::RingCollected { ring, remaining });
                }
                Some(RingTally::Won { elapsed }) => {
                    tracing::info!(ring, elapsed, "all rings collected");
                    self.messages
                        .show(hud::won_text(elapsed, start_key), None, now);
                    events.push(RaceEvent::RingCollected { ring, remaining: 0 });
                    events.push(RaceEvent::Won { elapsed });
                }
                None => {}
            }
        }
    }
}
