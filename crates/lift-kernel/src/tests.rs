//! Unit tests for lift-kernel.

use lift_core::{ChannelId, CounterId, SignalId, SimTime};

use crate::{Ctx, Kernel, KernelResult, Process, Step};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Shared world for test processes: (time, label) pairs in execution order.
type Log = Vec<(f64, String)>;

fn log(ctx: &mut Ctx<'_, Log, u32>, label: impl Into<String>) {
    let now = ctx.now().minutes();
    ctx.world.push((now, label.into()));
}

fn labels(world: &Log) -> Vec<&str> {
    world.iter().map(|(_, l)| l.as_str()).collect()
}

/// Logs on every resume, then holds for each nap in turn.
struct Sleeper {
    label: &'static str,
    naps:  std::vec::IntoIter<f64>,
}

impl Sleeper {
    fn boxed(label: &'static str, naps: Vec<f64>) -> Box<Self> {
        Box::new(Self { label, naps: naps.into_iter() })
    }
}

impl Process<Log, u32> for Sleeper {
    fn name(&self) -> &'static str { "sleeper" }
    fn resume(&mut self, ctx: &mut Ctx<'_, Log, u32>) -> KernelResult<Step> {
        log(ctx, self.label);
        Ok(self.naps.next().map_or(Step::Done, Step::Hold))
    }
}

/// Optionally holds, then waits on a signal once and logs when woken.
struct Waiter {
    label:  &'static str,
    signal: SignalId,
    delay:  Option<f64>,
    asked:  bool,
}

impl Process<Log, u32> for Waiter {
    fn name(&self) -> &'static str { "waiter" }
    fn resume(&mut self, ctx: &mut Ctx<'_, Log, u32>) -> KernelResult<Step> {
        if let Some(d) = self.delay.take() {
            return Ok(Step::Hold(d));
        }
        if !self.asked {
            self.asked = true;
            return Ok(Step::Wait(self.signal));
        }
        log(ctx, self.label);
        Ok(Step::Done)
    }
}

/// Holds `delay`, raises the signal, logs how many it woke.
struct Raiser {
    signal: SignalId,
    delay:  f64,
    fired:  bool,
}

impl Process<Log, u32> for Raiser {
    fn name(&self) -> &'static str { "raiser" }
    fn resume(&mut self, ctx: &mut Ctx<'_, Log, u32>) -> KernelResult<Step> {
        if !self.fired {
            self.fired = true;
            return Ok(Step::Hold(self.delay));
        }
        let woken = ctx.signal(self.signal)?;
        log(ctx, format!("raised {woken}"));
        Ok(Step::Done)
    }
}

/// Optionally holds, receives once, logs the value.
struct Receiver {
    label:   &'static str,
    channel: ChannelId,
    delay:   Option<f64>,
    asked:   bool,
}

impl Receiver {
    fn boxed(label: &'static str, channel: ChannelId, delay: Option<f64>) -> Box<Self> {
        Box::new(Self { label, channel, delay, asked: false })
    }
}

impl Process<Log, u32> for Receiver {
    fn name(&self) -> &'static str { "receiver" }
    fn resume(&mut self, ctx: &mut Ctx<'_, Log, u32>) -> KernelResult<Step> {
        if let Some(d) = self.delay.take() {
            return Ok(Step::Hold(d));
        }
        if !self.asked {
            self.asked = true;
            return Ok(Step::Receive(self.channel));
        }
        let value = ctx.received()?;
        log(ctx, format!("{} got {value}", self.label));
        Ok(Step::Done)
    }
}

/// Holds `delay`, then sends every value without blocking.
struct Sender {
    channel: ChannelId,
    delay:   f64,
    values:  Vec<u32>,
    fired:   bool,
}

impl Process<Log, u32> for Sender {
    fn name(&self) -> &'static str { "sender" }
    fn resume(&mut self, ctx: &mut Ctx<'_, Log, u32>) -> KernelResult<Step> {
        if !self.fired {
            self.fired = true;
            return Ok(Step::Hold(self.delay));
        }
        let waiting = ctx.waiting(self.channel)?;
        log(ctx, format!("sending to {waiting}"));
        for v in std::mem::take(&mut self.values) {
            ctx.send(self.channel, v)?;
        }
        Ok(Step::Done)
    }
}

fn kernel(horizon: f64) -> Kernel<Log, u32> {
    Kernel::new(horizon)
}

// ── EventQueue ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod event_queue {
    use lift_core::{ProcessId, SimTime};

    use crate::{EventQueue, Resumption, WakeReason};

    fn r(pid: u32) -> Resumption {
        Resumption { process: ProcessId(pid), reason: WakeReason::Timer }
    }

    #[test]
    fn pops_in_time_order_fifo_within_ties() {
        let mut q = EventQueue::new();
        q.push(SimTime::new(2.0), r(0));
        q.push(SimTime::new(1.0), r(1));
        q.push(SimTime::new(2.0), r(2));
        q.push(SimTime::new(1.0), r(3));
        assert_eq!(q.len(), 4);
        assert_eq!(q.time_count(), 2);
        assert_eq!(q.next_time(), Some(SimTime::new(1.0)));

        let order: Vec<u32> = std::iter::from_fn(|| q.pop()).map(|(_, r)| r.process.0).collect();
        assert_eq!(order, vec![1, 3, 0, 2]);
        assert!(q.is_empty());
        assert_eq!(q.next_time(), None);
    }

    #[test]
    fn clear_empties() {
        let mut q = EventQueue::new();
        q.push(SimTime::new(1.0), r(0));
        q.clear();
        assert!(q.is_empty());
        assert!(q.pop().is_none());
    }
}

// ── TimeWeighted ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod time_weighted {
    use lift_core::SimTime;

    use crate::TimeWeighted;

    #[test]
    fn mean_and_busy_fraction() {
        let mut tw = TimeWeighted::new(SimTime::ZERO);
        tw.set(SimTime::new(2.0), 3.0);
        tw.set(SimTime::new(4.0), 0.0);
        // level 0 on [0,2), 3 on [2,4), 0 on [4,8)
        assert_eq!(tw.mean(SimTime::new(8.0)), 6.0 / 8.0);
        assert_eq!(tw.busy_fraction(SimTime::new(8.0)), 2.0 / 8.0);
        assert_eq!(tw.peak(), 3.0);
    }

    #[test]
    fn open_interval_counts_current_level() {
        let mut tw = TimeWeighted::new(SimTime::ZERO);
        tw.set(SimTime::ZERO, 2.0);
        assert_eq!(tw.mean(SimTime::new(5.0)), 2.0);
        assert_eq!(tw.busy_fraction(SimTime::new(5.0)), 1.0);
        assert_eq!(tw.mean(SimTime::ZERO), 2.0);
    }
}

// ── Scheduling ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod scheduling {
    use super::*;
    use crate::KernelError;

    #[test]
    fn equal_timestamps_resume_in_fifo_order() {
        let mut k = kernel(100.0);
        let mut world = Log::new();
        k.spawn(Sleeper::boxed("a", vec![1.0]));
        k.spawn(Sleeper::boxed("b", vec![1.0]));
        k.run(&mut world).unwrap();
        assert_eq!(labels(&world), vec!["a", "b", "a", "b"]);
        assert_eq!(world[2].0, 1.0);
        assert_eq!(k.stats().finished, 2);
        assert_eq!(k.live_processes(), 0);
    }

    #[test]
    fn step_resumes_exactly_one_process() {
        let mut k = kernel(100.0);
        let mut world = Log::new();
        k.spawn(Sleeper::boxed("a", vec![]));
        k.spawn(Sleeper::boxed("b", vec![]));
        assert_eq!(k.step(&mut world).unwrap(), Some(SimTime::ZERO));
        assert_eq!(world.len(), 1);
        assert_eq!(k.pending(), 1);
    }

    #[test]
    fn stops_before_horizon_and_halt_drops_survivors() {
        let mut k = kernel(12.0);
        let mut world = Log::new();
        k.spawn(Sleeper::boxed("tick", vec![5.0; 10]));
        let end = k.run(&mut world).unwrap();
        assert_eq!(end, SimTime::new(10.0));
        assert_eq!(world.iter().map(|(t, _)| *t).collect::<Vec<_>>(), vec![0.0, 5.0, 10.0]);

        assert_eq!(k.halt().unwrap(), 1);
        assert_eq!(k.now(), SimTime::new(12.0));
        assert_eq!(k.stats().halted, 1);
        assert_eq!(k.pending(), 0);
        assert_eq!(k.step(&mut world).unwrap(), None);
    }

    #[test]
    fn resumption_exactly_at_horizon_is_not_run() {
        let mut k = kernel(10.0);
        let mut world = Log::new();
        k.spawn(Sleeper::boxed("tick", vec![10.0]));
        k.run(&mut world).unwrap();
        assert_eq!(world.len(), 1);
    }

    #[test]
    fn negative_hold_is_an_error() {
        let mut k = kernel(10.0);
        let mut world = Log::new();
        k.spawn(Sleeper::boxed("bad", vec![-1.0]));
        assert!(matches!(k.step(&mut world), Err(KernelError::NegativeDuration(_))));
    }

    #[test]
    fn schedule_after_validates() {
        let mut k = kernel(10.0);
        let mut world = Log::new();
        let pid = k.spawn(Sleeper::boxed("a", vec![]));
        assert!(matches!(k.schedule_after(-0.5, pid), Err(KernelError::NegativeDuration(_))));
        assert!(matches!(
            k.schedule_after(1.0, lift_core::ProcessId(99)),
            Err(KernelError::UnknownProcess(_))
        ));

        // Drive the start resumption, then the process is done and gone.
        k.run(&mut world).unwrap();
        assert!(k.schedule_after(1.0, pid).is_err());
    }

    #[test]
    fn schedule_after_wakes_a_waiting_process() {
        let mut k = kernel(10.0);
        let mut world = Log::new();
        let signal = k.add_signal("never");
        let pid = k.spawn(Box::new(Waiter { label: "w", signal, delay: None, asked: false }));
        k.run(&mut world).unwrap();
        assert!(world.is_empty());

        k.schedule_after(3.0, pid).unwrap();
        k.run(&mut world).unwrap();
        assert_eq!(world, vec![(3.0, "w".to_string())]);
    }

    struct Spawner;

    impl Process<Log, u32> for Spawner {
        fn name(&self) -> &'static str { "spawner" }
        fn resume(&mut self, ctx: &mut Ctx<'_, Log, u32>) -> KernelResult<Step> {
            ctx.spawn(Sleeper::boxed("child", vec![]));
            log(ctx, "parent");
            Ok(Step::Done)
        }
    }

    #[test]
    fn processes_spawn_processes() {
        let mut k = kernel(10.0);
        let mut world = Log::new();
        k.spawn(Box::new(Spawner));
        k.run(&mut world).unwrap();
        assert_eq!(labels(&world), vec!["parent", "child"]);
        assert_eq!(k.stats().spawned, 2);
        assert_eq!(k.stats().finished, 2);
    }

    struct Impatient;

    impl Process<Log, u32> for Impatient {
        fn name(&self) -> &'static str { "impatient" }
        fn resume(&mut self, ctx: &mut Ctx<'_, Log, u32>) -> KernelResult<Step> {
            ctx.received()?;
            Ok(Step::Done)
        }
    }

    #[test]
    fn reading_an_empty_inbox_errors() {
        let mut k = kernel(10.0);
        let mut world = Log::new();
        k.spawn(Box::new(Impatient));
        assert!(matches!(k.step(&mut world), Err(KernelError::EmptyInbox(_))));
    }
}

// ── WakeSignal ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod signals {
    use super::*;

    #[test]
    fn raise_wakes_every_waiter_in_order() {
        let mut k = kernel(100.0);
        let mut world = Log::new();
        let signal = k.add_signal("wakeup");
        k.spawn(Box::new(Waiter { label: "w1", signal, delay: None, asked: false }));
        k.spawn(Box::new(Waiter { label: "w2", signal, delay: None, asked: false }));
        k.spawn(Box::new(Raiser { signal, delay: 3.0, fired: false }));
        k.run(&mut world).unwrap();
        assert_eq!(labels(&world), vec!["raised 2", "w1", "w2"]);
        assert!(world.iter().all(|(t, _)| *t == 3.0));
        let s = k.signal(signal).unwrap();
        assert_eq!(s.waiters(), 0);
        assert_eq!(s.raised(), 1);
    }

    #[test]
    fn raise_without_waiters_is_forgotten() {
        let mut k = kernel(100.0);
        let mut world = Log::new();
        let signal = k.add_signal("wakeup");
        k.spawn(Box::new(Raiser { signal, delay: 1.0, fired: false }));
        k.spawn(Box::new(Waiter { label: "late", signal, delay: Some(2.0), asked: false }));
        k.run(&mut world).unwrap();
        assert_eq!(labels(&world), vec!["raised 0"]);
        assert_eq!(k.live_processes(), 1);
        assert_eq!(k.signal(signal).unwrap().waiters(), 1);
    }
}

// ── RendezvousChannel ─────────────────────────────────────────────────────────

#[cfg(test)]
mod channels {
    use super::*;

    #[test]
    fn send_hands_off_to_blocked_receivers_fifo() {
        let mut k = kernel(100.0);
        let mut world = Log::new();
        let ch = k.add_channel("floor 0 up");
        k.spawn(Receiver::boxed("r1", ch, None));
        k.spawn(Receiver::boxed("r2", ch, None));
        k.spawn(Box::new(Sender { channel: ch, delay: 2.0, values: vec![10, 20, 30], fired: false }));
        k.spawn(Receiver::boxed("r3", ch, Some(5.0)));
        k.run(&mut world).unwrap();

        assert_eq!(
            world,
            vec![
                (2.0, "sending to 2".to_string()),
                (2.0, "r1 got 10".to_string()),
                (2.0, "r2 got 20".to_string()),
                (5.0, "r3 got 30".to_string()),
            ]
        );

        let channel = k.channel(ch).unwrap();
        assert_eq!(channel.waiting(), 0);
        assert_eq!(channel.buffered(), 0);
        let stats = channel.stats();
        assert_eq!(stats.arrivals, 3);
        assert_eq!(stats.handoffs, 3);
        assert_eq!(stats.peak_waiting, 2);
        assert_eq!(stats.max_wait, 2.0);
        assert_eq!(stats.mean_wait(), 4.0 / 3.0);
        // two receivers blocked on [0, 2), none afterwards
        assert_eq!(channel.mean_waiting(SimTime::new(4.0)), 1.0);
    }

    #[test]
    fn unclaimed_values_stay_buffered() {
        let mut k = kernel(100.0);
        let mut world = Log::new();
        let ch = k.add_channel("idle");
        k.spawn(Box::new(Sender { channel: ch, delay: 0.0, values: vec![1, 2], fired: false }));
        k.run(&mut world).unwrap();
        assert_eq!(labels(&world), vec!["sending to 0"]);
        assert_eq!(k.channel(ch).unwrap().buffered(), 2);
        assert_eq!(k.channel(ch).unwrap().stats().handoffs, 0);
    }
}

// ── ResourceCounter ───────────────────────────────────────────────────────────

#[cfg(test)]
mod counters {
    use super::*;
    use crate::ResourceCounter;

    /// Reserves twice, then releases one holder every two minutes.
    struct Worker {
        counter: CounterId,
        stage:   u8,
    }

    impl Process<Log, u32> for Worker {
        fn name(&self) -> &'static str { "worker" }
        fn resume(&mut self, ctx: &mut Ctx<'_, Log, u32>) -> KernelResult<Step> {
            self.stage += 1;
            match self.stage {
                1 => {
                    ctx.reserve(self.counter)?;
                    ctx.reserve(self.counter)?;
                    Ok(Step::Hold(2.0))
                }
                2 => {
                    ctx.release(self.counter)?;
                    Ok(Step::Hold(2.0))
                }
                _ => {
                    ctx.release(self.counter)?;
                    Ok(Step::Done)
                }
            }
        }
    }

    #[test]
    fn tracks_holders_over_time() {
        let mut k = kernel(100.0);
        let mut world = Log::new();
        let c = k.add_counter("elevator 0 workload");
        k.spawn(Box::new(Worker { counter: c, stage: 0 }));
        k.run(&mut world).unwrap();

        let counter = k.counter(c).unwrap();
        assert_eq!(counter.holders(), 0);
        let at4 = counter.stats(SimTime::new(4.0));
        assert_eq!(at4.reservations, 2);
        assert_eq!(at4.peak_holders, 2);
        assert_eq!(at4.mean_holders, 1.5);
        assert_eq!(at4.busy_fraction, 1.0);
        let at8 = counter.stats(SimTime::new(8.0));
        assert_eq!(at8.mean_holders, 0.75);
        assert_eq!(at8.busy_fraction, 0.5);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "without a matching reserve")]
    fn unbalanced_release_panics_in_debug() {
        let mut counter = ResourceCounter::new(CounterId(0), "gauge", SimTime::ZERO);
        let _ = counter.release(SimTime::ZERO);
    }

    #[test]
    #[cfg(not(debug_assertions))]
    fn unbalanced_release_errors_in_release() {
        let mut counter = ResourceCounter::new(CounterId(0), "gauge", SimTime::ZERO);
        assert!(counter.release(SimTime::ZERO).is_err());
    }
}
