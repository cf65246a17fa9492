//! Per-node animation scope.
//!
//! An `AnimationScope` owns the jobs launched by one node. It is driven by the
//! host's frame clock through [`AnimationScope::tick`], which advances every
//! live job and returns one [`JobFrame`] per job. Dropping or clearing the
//! scope cancels everything it owns.

use std::sync::atomic::{AtomicU64, Ordering};

use super::motion::Motion;

/// Handle identifying one launched job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct JobHandle(u64);

impl JobHandle {
    fn next() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    pub fn id(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum JobState {
    /// Launched, waiting for its first frame.
    Pending,
    Running,
    /// Finished, cancelled, or never launched by this scope.
    Completed,
}

/// Sample produced by one job during a tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JobFrame {
    pub job: JobHandle,
    pub value: f32,
    pub velocity: f32,
    /// Last frame of this job; it has been removed from the scope.
    pub finished: bool,
}

#[derive(Debug)]
struct Job {
    handle: JobHandle,
    motion: Box<dyn Motion>,
    /// Accumulated in f64 so infinite jobs keep advancing on long sessions.
    elapsed_ms: f64,
    state: JobState,
}

#[derive(Debug, Default)]
pub struct AnimationScope {
    jobs: Vec<Job>,
}

impl AnimationScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a job. Its first frame, sampled at play time 0, is produced by
    /// the next `tick`.
    pub fn launch(&mut self, motion: impl Motion + 'static) -> JobHandle {
        let handle = JobHandle::next();
        self.jobs.push(Job {
            handle,
            motion: Box::new(motion),
            elapsed_ms: 0.0,
            state: JobState::Pending,
        });
        handle
    }

    /// Cancel a job. Returns `false` if it had already ended.
    pub fn cancel(&mut self, job: JobHandle) -> bool {
        let before = self.jobs.len();
        self.jobs.retain(|j| j.handle != job);
        self.jobs.len() != before
    }

    /// Cancel every job, returning how many were live.
    pub fn cancel_all(&mut self) -> usize {
        let count = self.jobs.len();
        self.jobs.clear();
        count
    }

    #[cfg(test)]
    fn state(&self, job: JobHandle) -> JobState {
        self.jobs
            .iter()
            .find(|j| j.handle == job)
            .map(|j| j.state)
            .unwrap_or(JobState::Completed)
    }

    pub fn is_active(&self, job: JobHandle) -> bool {
        self.jobs.iter().any(|j| j.handle == job)
    }

    /// Whether any job that can complete on its own is still live.
    pub fn has_finite_jobs(&self) -> bool {
        self.jobs.iter().any(|j| !j.motion.is_infinite())
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Advance all jobs by `delta_ms` and collect their frames.
    ///
    /// Jobs launched since the previous tick are sampled at play time 0.
    /// Finished jobs are removed after reporting their final frame.
    pub fn tick(&mut self, delta_ms: f32) -> Vec<JobFrame> {
        let delta_ms = f64::from(delta_ms.max(0.0));
        let mut frames = Vec::with_capacity(self.jobs.len());

        for job in &mut self.jobs {
            if job.state == JobState::Pending {
                job.state = JobState::Running;
            } else {
                job.elapsed_ms += delta_ms;
            }

            let sample = job.motion.sample(job.elapsed_ms);
            if sample.finished {
                job.state = JobState::Completed;
            }
            frames.push(JobFrame {
                job: job.handle,
                value: sample.value,
                velocity: sample.velocity,
                finished: sample.finished,
            });
        }

        self.jobs.retain(|j| j.state != JobState::Completed);
        frames
    }
}
