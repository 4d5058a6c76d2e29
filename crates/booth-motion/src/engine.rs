//! The engine task: sampling loop, cooldown timer, warm dispatch.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval, sleep_until, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use booth_models::TriggerKind;
use booth_predict::WarmProbe;

use crate::config::WarmerConfig;
use crate::detector::MotionDetector;
use crate::frame::FrameSource;
use crate::scheduler::{TriggerDecision, WarmScheduler};

/// Warm-call capability used by the engine.
///
/// One call is one full warm attempt resolving at a terminal outcome; the
/// engine guarantees at most one runs at a time.
#[async_trait]
pub trait WarmClient: Send + Sync + 'static {
    async fn warm(&self) -> anyhow::Result<()>;
}

#[async_trait]
impl WarmClient for WarmProbe {
    async fn warm(&self) -> anyhow::Result<()> {
        WarmProbe::warm(self).await?;
        Ok(())
    }
}

/// Engine notifications, delivered at most once per attempt outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WarmEvent {
    MotionDetected,
    WarmingStarted,
    WarmingCompleted,
    WarmingFailed { message: String },
}

#[derive(Debug)]
enum Command {
    Interaction,
    Freeze,
    Reset,
    Stop,
}

/// Control handle for a running engine.
///
/// Dropping the handle (or calling [`stop`](Self::stop)) ends detection;
/// an in-flight warm attempt keeps running detached and its outcome is
/// discarded.
pub struct WarmerHandle {
    commands: mpsc::UnboundedSender<Command>,
    task: JoinHandle<()>,
}

impl WarmerHandle {
    /// Report a pointer/touch interaction anywhere in the kiosk UI.
    pub fn interaction(&self) {
        self.commands.send(Command::Interaction).ok();
    }

    /// Suppress warming while the real capture request runs.
    pub fn freeze(&self) {
        self.commands.send(Command::Freeze).ok();
    }

    /// Lift a freeze; the completed real request counts as a warm.
    pub fn reset(&self) {
        self.commands.send(Command::Reset).ok();
    }

    /// Stop detection and wait for the engine task to finish.
    pub async fn stop(self) {
        self.commands.send(Command::Stop).ok();
        self.task.await.ok();
    }
}

/// Motion-warming engine.
///
/// Owns the detector, the scheduler and the borrowed frame source for one
/// camera session. `spawn` moves everything into a single tokio task; the
/// returned handle is the only way to reach it.
pub struct MotionWarmer<S, W> {
    config: WarmerConfig,
    source: S,
    client: Arc<W>,
    events: Option<mpsc::UnboundedSender<WarmEvent>>,
}

impl<S, W> MotionWarmer<S, W>
where
    S: FrameSource + 'static,
    W: WarmClient,
{
    pub fn new(config: WarmerConfig, source: S, client: Arc<W>) -> Self {
        Self {
            config,
            source,
            client,
            events: None,
        }
    }

    /// Subscribe an event channel. A closed receiver never blocks the engine.
    pub fn with_events(mut self, events: mpsc::UnboundedSender<WarmEvent>) -> Self {
        self.events = Some(events);
        self
    }

    /// Start detection.
    pub fn spawn(self) -> WarmerHandle {
        let (commands, rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(self.run(rx));
        WarmerHandle { commands, task }
    }

    async fn run(self, mut commands: mpsc::UnboundedReceiver<Command>) {
        let MotionWarmer {
            config,
            mut source,
            client,
            events,
        } = self;

        let mut detector =
            MotionDetector::new(config.motion_threshold, config.motion_pixel_threshold);
        let mut scheduler = WarmScheduler::new(config.cooldown_period);

        let mut ticker = interval(config.frame_check_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let skip_frames = config.skip_frames.max(1);
        let mut skipped_ticks: u32 = 0;

        // At most one of each: armed cooldown timer, in-flight attempt.
        let mut cooldown_deadline: Option<Instant> = None;
        let mut inflight: Option<JoinHandle<anyhow::Result<()>>> = None;

        info!(
            interval = ?config.frame_check_interval,
            cooldown = ?config.cooldown_period,
            "Motion warming started"
        );

        loop {
            let deadline = cooldown_deadline;

            tokio::select! {
                _ = ticker.tick() => {
                    skipped_ticks += 1;
                    if skipped_ticks < skip_frames {
                        continue;
                    }
                    skipped_ticks = 0;

                    let Some(frame) =
                        source.sample(config.canvas_width, config.canvas_height)
                    else {
                        continue;
                    };

                    if detector.observe(frame).is_motion() {
                        emit(&events, WarmEvent::MotionDetected);
                        apply_trigger(
                            TriggerKind::Motion,
                            &mut scheduler,
                            &mut cooldown_deadline,
                            &mut inflight,
                            &client,
                            &events,
                        );
                    }
                }

                _ = async { sleep_until(deadline.unwrap()).await }, if deadline.is_some() => {
                    cooldown_deadline = None;
                    if scheduler.on_timer_fired() {
                        emit(&events, WarmEvent::WarmingStarted);
                        inflight = Some(spawn_warm(&client));
                    }
                }

                outcome = async { inflight.as_mut().unwrap().await }, if inflight.is_some() => {
                    inflight = None;
                    let success = match outcome {
                        Ok(Ok(())) => {
                            info!("Warm attempt completed");
                            emit(&events, WarmEvent::WarmingCompleted);
                            true
                        }
                        Ok(Err(e)) => {
                            warn!("Warm attempt failed: {e:#}");
                            emit(&events, WarmEvent::WarmingFailed { message: e.to_string() });
                            false
                        }
                        Err(e) => {
                            warn!("Warm task aborted: {e}");
                            emit(&events, WarmEvent::WarmingFailed { message: e.to_string() });
                            false
                        }
                    };
                    scheduler.on_complete(success, Instant::now());
                }

                cmd = commands.recv() => match cmd {
                    Some(Command::Interaction) => {
                        apply_trigger(
                            TriggerKind::Interaction,
                            &mut scheduler,
                            &mut cooldown_deadline,
                            &mut inflight,
                            &client,
                            &events,
                        );
                    }
                    Some(Command::Freeze) => {
                        cooldown_deadline = None;
                        scheduler.freeze();
                        info!("Warming frozen for real capture");
                    }
                    Some(Command::Reset) => {
                        scheduler.reset(Instant::now());
                        info!("Warming cooldown reset after real capture");
                    }
                    Some(Command::Stop) | None => break,
                }
            }
        }

        // Buffers and timers die with the task. An in-flight attempt keeps
        // running detached; nothing is left to receive its outcome.
        info!("Motion warming stopped");
    }
}

fn apply_trigger<W: WarmClient>(
    kind: TriggerKind,
    scheduler: &mut WarmScheduler,
    cooldown_deadline: &mut Option<Instant>,
    inflight: &mut Option<JoinHandle<anyhow::Result<()>>>,
    client: &Arc<W>,
    events: &Option<mpsc::UnboundedSender<WarmEvent>>,
) {
    let now = Instant::now();
    match scheduler.on_trigger(kind, now) {
        TriggerDecision::Fire => {
            debug!(trigger = %kind, "Warm trigger fires immediately");
            *cooldown_deadline = None;
            emit(events, WarmEvent::WarmingStarted);
            *inflight = Some(spawn_warm(client));
        }
        TriggerDecision::Defer(remaining) => {
            debug!(trigger = %kind, ?remaining, "Warm trigger deferred until cooldown elapses");
            *cooldown_deadline = Some(now + remaining);
        }
        TriggerDecision::Skip(reason) => {
            debug!(trigger = %kind, ?reason, "Warm trigger skipped");
        }
    }
}

fn spawn_warm<W: WarmClient>(client: &Arc<W>) -> JoinHandle<anyhow::Result<()>> {
    let client = Arc::clone(client);
    tokio::spawn(async move { client.warm().await })
}

fn emit(events: &Option<mpsc::UnboundedSender<WarmEvent>>, event: WarmEvent) {
    if let Some(tx) = events {
        tx.send(event).ok();
    }
}
