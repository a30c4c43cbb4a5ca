//! Two-player paddle rally.
//!
//! Exercises the Talvi input stack end to end: shared actions bound across
//! keyboard, mouse, and gamepads; slot-scoped bindings so each side only
//! answers to its own pad; analog strength driving paddle speed; scroll
//! ticks as edge-triggered actions; rumble and LED color on the pad that
//! touched the ball.
//!
//! Controls:
//! - Left paddle: W/S, or slot-0 pad left stick / D-pad
//! - Right paddle: Up/Down arrows, or slot-1 pad left stick / D-pad
//! - Serve: Space, left mouse button, or any pad's south button
//! - Scroll wheel: tune the serve speed
//! - Escape or Back: quit
//!
//! There is no sprite layer; the court lives in the log and the clear color
//! tracks whoever last scored.

use std::time::Duration;

use glam::Vec2;
use talvi_core::{
    App, Color, Context, GamepadAxis, GamepadButton, Key, MouseButton, MouseWheel, ProjectSettings,
};

const COURT_WIDTH: f32 = 960.0;
const COURT_HEIGHT: f32 = 540.0;

const PADDLE_HALF_HEIGHT: f32 = 40.0;
const PADDLE_SPEED: f32 = 420.0;
const PADDLE_MARGIN: f32 = 30.0;

const BALL_RADIUS: f32 = 8.0;
const SERVE_SPEED: f32 = 320.0;
const BALL_SPEED_MAX: f32 = 780.0;
const BALL_SPEEDUP: f32 = 1.06;
const SPIN: f32 = 230.0;

const WIN_SCORE: u32 = 5;

const COURT_COLOR: Color = Color::rgb(26, 26, 46);
const LEFT_COLOR: Color = Color::DARK_BLUE;
const RIGHT_COLOR: Color = Color::MAROON;

#[derive(Clone, Copy)]
enum Phase {
    /// Ball is parked until someone presses serve.
    Serving { toward_left: bool },
    Rally,
}

struct PaddleGame {
    phase: Phase,
    left_y: f32,
    right_y: f32,
    ball: Vec2,
    ball_vel: Vec2,
    score: [u32; 2],
    serve_scale: f32,
    pads_seen: usize,
}

impl Default for PaddleGame {
    fn default() -> Self {
        Self {
            phase: Phase::Serving { toward_left: true },
            left_y: COURT_HEIGHT / 2.0,
            right_y: COURT_HEIGHT / 2.0,
            ball: Vec2::new(COURT_WIDTH / 2.0, COURT_HEIGHT / 2.0),
            ball_vel: Vec2::ZERO,
            score: [0, 0],
            serve_scale: 1.0,
            pads_seen: 0,
        }
    }
}

impl PaddleGame {
    /// Greet pads as they come and go. Connection bookkeeping already logs
    /// the slot; this adds what the pad calls its serve button.
    fn log_new_gamepads(&mut self, ctx: &Context) {
        let count = ctx.devices().gamepad_count();
        if count == self.pads_seen {
            return;
        }
        self.pads_seen = count;
        for pad in ctx.devices().active_gamepads() {
            tracing::info!(
                "Pad ready: {} ({:?}), serve button reads {:?}",
                pad.name(),
                pad.gamepad_type(),
                pad.button_label(GamepadButton::South)
            );
        }
    }

    fn tune_serve(&mut self, ctx: &Context) {
        let mut scale = self.serve_scale;
        if ctx.is_action_just_pressed("serve_faster") {
            scale += 0.1;
        }
        if ctx.is_action_just_pressed("serve_slower") {
            scale -= 0.1;
        }
        scale = scale.clamp(0.5, 2.0);
        if scale != self.serve_scale {
            self.serve_scale = scale;
            tracing::info!("Serve speed x{:.1}", scale);
        }
    }

    fn serve(&mut self, ctx: &mut Context, toward_left: bool) {
        self.ball = Vec2::new(COURT_WIDTH / 2.0, COURT_HEIGHT / 2.0);
        let dir = if toward_left { -1.0 } else { 1.0 };
        let tilt = if (self.score[0] + self.score[1]) % 2 == 0 {
            0.3
        } else {
            -0.3
        };
        self.ball_vel = Vec2::new(dir, tilt).normalize() * SERVE_SPEED * self.serve_scale;

        for (slot, color) in [(0, LEFT_COLOR), (1, RIGHT_COLOR)] {
            if let Some(pad) = ctx.devices_mut().gamepad_mut(slot) {
                pad.set_led_color(color);
            }
        }
        ctx.set_clear_color(COURT_COLOR);
        self.phase = Phase::Rally;
    }

    /// Reflect off a paddle, add spin from the contact offset, and thump
    /// the pad on that side.
    fn deflect(&mut self, ctx: &mut Context, slot: usize, paddle_y: f32) {
        let offset = (self.ball.y - paddle_y) / (PADDLE_HALF_HEIGHT + BALL_RADIUS);
        self.ball_vel.x = -self.ball_vel.x;
        self.ball_vel.y += offset * SPIN;
        if self.ball_vel.length() < BALL_SPEED_MAX {
            self.ball_vel *= BALL_SPEEDUP;
        }

        let punch = (self.ball_vel.length() / BALL_SPEED_MAX).clamp(0.2, 1.0);
        if let Some(pad) = ctx.devices_mut().gamepad_mut(slot) {
            pad.begin_vibrate(punch, punch * 0.5, Duration::from_millis(120));
        }
    }

    fn point(&mut self, ctx: &mut Context, scorer: usize) {
        self.score[scorer] += 1;
        let side = if scorer == 0 { "Left" } else { "Right" };
        tracing::info!("{side} scores, {} - {}", self.score[0], self.score[1]);
        ctx.set_clear_color(if scorer == 0 { LEFT_COLOR } else { RIGHT_COLOR });
        ctx.window()
            .set_title(&format!("Paddle  {} - {}", self.score[0], self.score[1]));

        if self.score[scorer] >= WIN_SCORE {
            tracing::info!("{side} side takes the match");
            self.score = [0, 0];
        }
        // Loser serves
        self.phase = Phase::Serving {
            toward_left: scorer == 1,
        };
    }

    fn step_ball(&mut self, ctx: &mut Context, delta: f32) {
        self.ball += self.ball_vel * delta;

        if self.ball.y <= BALL_RADIUS {
            self.ball.y = BALL_RADIUS;
            self.ball_vel.y = self.ball_vel.y.abs();
        } else if self.ball.y >= COURT_HEIGHT - BALL_RADIUS {
            self.ball.y = COURT_HEIGHT - BALL_RADIUS;
            self.ball_vel.y = -self.ball_vel.y.abs();
        }

        let left_x = PADDLE_MARGIN + BALL_RADIUS;
        let right_x = COURT_WIDTH - PADDLE_MARGIN - BALL_RADIUS;
        if self.ball_vel.x < 0.0
            && self.ball.x <= left_x
            && (self.ball.y - self.left_y).abs() <= PADDLE_HALF_HEIGHT + BALL_RADIUS
        {
            self.ball.x = left_x;
            self.deflect(ctx, 0, self.left_y);
        } else if self.ball_vel.x > 0.0
            && self.ball.x >= right_x
            && (self.ball.y - self.right_y).abs() <= PADDLE_HALF_HEIGHT + BALL_RADIUS
        {
            self.ball.x = right_x;
            self.deflect(ctx, 1, self.right_y);
        }

        if self.ball.x < -BALL_RADIUS {
            self.point(ctx, 1);
        } else if self.ball.x > COURT_WIDTH + BALL_RADIUS {
            self.point(ctx, 0);
        }
    }
}

impl App for PaddleGame {
    fn load(&mut self, ctx: &mut Context) -> anyhow::Result<()> {
        // Left paddle: keyboard or the pad in slot 0
        ctx.bind("p1_up", Key::W);
        ctx.bind("p1_down", Key::S);
        ctx.bind_slot("p1_up", GamepadAxis::LeftStickUp, 0);
        ctx.bind_slot("p1_down", GamepadAxis::LeftStickDown, 0);
        ctx.bind_slot("p1_up", GamepadButton::DpadUp, 0);
        ctx.bind_slot("p1_down", GamepadButton::DpadDown, 0);

        // Right paddle: keyboard or the pad in slot 1
        ctx.bind("p2_up", Key::ArrowUp);
        ctx.bind("p2_down", Key::ArrowDown);
        ctx.bind_slot("p2_up", GamepadAxis::LeftStickUp, 1);
        ctx.bind_slot("p2_down", GamepadAxis::LeftStickDown, 1);
        ctx.bind_slot("p2_up", GamepadButton::DpadUp, 1);
        ctx.bind_slot("p2_down", GamepadButton::DpadDown, 1);

        // Anyone can serve or quit
        ctx.bind("serve", Key::Space);
        ctx.bind("serve", MouseButton::Left);
        ctx.bind("serve", GamepadButton::South);
        ctx.bind("quit", Key::Escape);
        ctx.bind("quit", GamepadButton::Back);

        // Scroll ticks fire once per notch
        ctx.bind("serve_faster", MouseWheel::Up);
        ctx.bind("serve_slower", MouseWheel::Down);

        ctx.set_clear_color(COURT_COLOR);
        tracing::info!("Serve with Space, the left mouse button, or any pad's south button");
        Ok(())
    }

    fn update(&mut self, ctx: &mut Context, delta: f32) {
        if ctx.is_action_just_pressed("quit") {
            ctx.request_exit();
            return;
        }
        self.log_new_gamepads(ctx);
        self.tune_serve(ctx);

        let p1 = ctx.action_strength("p1_down") - ctx.action_strength("p1_up");
        self.left_y = (self.left_y + p1 * PADDLE_SPEED * delta)
            .clamp(PADDLE_HALF_HEIGHT, COURT_HEIGHT - PADDLE_HALF_HEIGHT);

        let p2 = ctx.action_strength("p2_down") - ctx.action_strength("p2_up");
        self.right_y = (self.right_y + p2 * PADDLE_SPEED * delta)
            .clamp(PADDLE_HALF_HEIGHT, COURT_HEIGHT - PADDLE_HALF_HEIGHT);

        // Direct device query: dragging with the right button steers the
        // left paddle from the cursor height
        let mouse = ctx.mouse();
        if mouse.is_button_pressed(MouseButton::Right) {
            let window_height = ctx.renderer().height() as f32;
            if window_height > 0.0 {
                let court_y = mouse.position().y / window_height * COURT_HEIGHT;
                self.left_y =
                    court_y.clamp(PADDLE_HALF_HEIGHT, COURT_HEIGHT - PADDLE_HALF_HEIGHT);
            }
        }

        match self.phase {
            Phase::Serving { toward_left } => {
                if ctx.is_action_just_pressed("serve") {
                    self.serve(ctx, toward_left);
                }
            }
            Phase::Rally => self.step_ball(ctx, delta),
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let mut settings = ProjectSettings::default();
    settings.window.title = "Paddle".to_string();
    settings.window.resizable = true;
    settings.input.stick_deadzone = 0.2;

    talvi_core::run(settings, PaddleGame::default())
}
