use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

type Job = Box<dyn FnOnce() + Send + 'static>;

enum Message {
    Job(Job),
    Terminate,
}

/// A fixed-size pool of worker threads draining one shared job queue. This
/// is the thread-backed variant of the parallel evaluator (C7): the driver
/// submits one job per unevaluated entity and collects fitness values as
/// workers finish, with no ordering guarantee between them.
pub struct ThreadPool {
    workers: Vec<Worker>,
    sender: Sender<Message>,
}

struct Worker {
    handle: Option<JoinHandle<()>>,
}

impl ThreadPool {
    pub fn new(size: usize) -> Self {
        assert!(size > 0, "thread pool size must be positive");
        let (sender, receiver) = mpsc::channel::<Message>();
        let receiver = Arc::new(Mutex::new(receiver));

        let workers = (0..size)
            .map(|_| Worker::spawn(Arc::clone(&receiver)))
            .collect();

        ThreadPool { workers, sender }
    }

    pub fn size(&self) -> usize {
        self.workers.len()
    }

    /// Submits a job and returns a handle whose `.join()` blocks until the
    /// worker that picked it up sends its result back.
    pub fn submit<F, T>(&self, job: F) -> WorkResult<T>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        let (tx, rx) = mpsc::channel();
        let task: Job = Box::new(move || {
            let result = job();
            let _ = tx.send(result);
        });
        self.sender
            .send(Message::Job(task))
            .expect("thread pool workers are alive");
        WorkResult { receiver: rx }
    }
}

impl Drop for ThreadPool {
    fn drop(&mut self) {
        for _ in &self.workers {
            let _ = self.sender.send(Message::Terminate);
        }
        for worker in &mut self.workers {
            if let Some(handle) = worker.handle.take() {
                let _ = handle.join();
            }
        }
    }
}

impl Worker {
    fn spawn(receiver: Arc<Mutex<Receiver<Message>>>) -> Worker {
        let handle = thread::spawn(move || loop {
            let message = receiver.lock().expect("thread pool mutex poisoned").recv();
            match message {
                Ok(Message::Job(job)) => job(),
                Ok(Message::Terminate) | Err(_) => break,
            }
        });
        Worker {
            handle: Some(handle),
        }
    }
}

/// A pending result from a job submitted to a [`ThreadPool`].
pub struct WorkResult<T> {
    receiver: mpsc::Receiver<T>,
}

impl<T> WorkResult<T> {
    pub fn join(self) -> Option<T> {
        self.receiver.recv().ok()
    }
}
