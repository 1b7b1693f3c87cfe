use crate::{
    App,
    clock::{Clock, TokioClock},
    events::{Effect, Event},
    frame_client::FrameClient,
    model::ViewModel,
    notifier::Notifier,
    services::{countdown::TICK_INTERVAL, status_poller::POLL_INTERVAL},
    types::{SlideshowAck, SlideshowCommand},
};
use futures_util::{
    FutureExt, StreamExt,
    future::LocalBoxFuture,
    stream::FuturesUnordered,
};
use log::{debug, info};
use std::{future::Future, sync::Arc};
use tokio::{
    sync::{mpsc, watch},
    time::{Instant, MissedTickBehavior, interval, sleep_until},
};

/// Drives the core: schedules polls and ticks, runs requested effects and
/// feeds their results back as events
///
/// Everything happens on the task calling [`Runtime::run`], so the core is
/// never touched concurrently.
pub struct Runtime<C, N, K = TokioClock> {
    app: App,
    client: Arc<C>,
    notifier: N,
    clock: K,
    pending: FuturesUnordered<LocalBoxFuture<'static, Event>>,
    view_tx: watch::Sender<ViewModel>,
}

impl<C, N> Runtime<C, N, TokioClock>
where
    C: FrameClient + 'static,
    N: Notifier,
{
    pub fn new(client: C, notifier: N, default_countdown: u32) -> Self {
        Self::with_clock(client, notifier, default_countdown, TokioClock)
    }
}

impl<C, N, K> Runtime<C, N, K>
where
    C: FrameClient + 'static,
    N: Notifier,
    K: Clock,
{
    pub fn with_clock(client: C, notifier: N, default_countdown: u32, clock: K) -> Self {
        let app = App::new(default_countdown);
        let (view_tx, _) = watch::channel(app.view());

        Self {
            app,
            client: Arc::new(client),
            notifier,
            clock,
            pending: FuturesUnordered::new(),
            view_tx,
        }
    }

    /// Receiver of the view published after every event
    pub fn subscribe(&self) -> watch::Receiver<ViewModel> {
        self.view_tx.subscribe()
    }

    /// Run until `shutdown` completes
    ///
    /// A closed command channel only stops user input, scheduling goes on.
    pub async fn run(
        mut self,
        mut commands: mpsc::Receiver<Event>,
        shutdown: impl Future<Output = ()>,
    ) {
        let mut poll = interval(POLL_INTERVAL);
        poll.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut tick = interval(TICK_INTERVAL);
        tick.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut commands_open = true;

        tokio::pin!(shutdown);
        info!("runtime started");

        loop {
            let deadline = self.app.next_deadline();

            tokio::select! {
                _ = &mut shutdown => break,
                _ = poll.tick() => self.dispatch(Event::Poll),
                _ = tick.tick() => self.dispatch(Event::Tick),
                _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    self.dispatch(Event::TimerElapsed)
                }
                Some(event) = self.pending.next(), if !self.pending.is_empty() => self.dispatch(event),
                command = commands.recv(), if commands_open => match command {
                    Some(event) => self.dispatch(event),
                    None => {
                        debug!("command channel closed");
                        commands_open = false;
                    }
                },
            }
        }

        info!("runtime stopped");
    }

    /// Apply one event to the core and publish the resulting view
    pub fn dispatch(&mut self, event: Event) {
        let now = self.clock.now();
        for effect in self.app.update(event, now) {
            self.execute(effect);
        }
        self.view_tx.send_replace(self.app.view());
    }

    fn execute(&mut self, effect: Effect) {
        let client = Arc::clone(&self.client);

        match effect {
            Effect::FetchStatus { requested_at } => self.spawn(async move {
                Event::StatusFetched {
                    requested_at,
                    result: client.status().await,
                }
            }),
            Effect::RequestPowerAction {
                kind,
                countdown_seconds,
            } => self.spawn(async move {
                Event::PowerActionResponse(client.power_action(kind, countdown_seconds).await)
            }),
            Effect::CancelPowerAction => self.spawn(async move {
                Event::CancelResponse(client.cancel_power_action().await)
            }),
            Effect::Slideshow(command) => self.spawn(async move {
                let result = match command {
                    SlideshowCommand::Next => client.next_image().await.map(|()| SlideshowAck::Next),
                    SlideshowCommand::Previous => {
                        client.previous_image().await.map(|()| SlideshowAck::Previous)
                    }
                    SlideshowCommand::TogglePause => {
                        client.toggle_pause().await.map(SlideshowAck::Paused)
                    }
                    SlideshowCommand::SetDisplay(mode) => {
                        client.set_display(mode).await.map(|()| SlideshowAck::Display(mode))
                    }
                };
                Event::SlideshowResponse(result)
            }),
            Effect::Notify(notification) => {
                self.notifier
                    .show(&notification.message, notification.severity)
            }
            Effect::Reload => {
                info!("reloading");
                // responses to requests of the old instance must not leak into the new one
                self.pending = FuturesUnordered::new();
                self.app.reload();
                let now = self.clock.now();
                for effect in self.app.update(Event::Poll, now) {
                    self.execute(effect);
                }
            }
        }
    }

    fn spawn(&mut self, request: impl Future<Output = Event> + 'static) {
        self.pending.push(request.boxed_local());
    }
}
