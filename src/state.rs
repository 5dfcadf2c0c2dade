use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use ride_recommender::data::filter::{Candidate, Selection, rank_candidates};
use ride_recommender::data::model::ReviewTable;
use ride_recommender::recommend::{Recommendation, Recommender};

use crate::color::ColorMap;

pub const NO_RECOMMENDATIONS: &str = "No recommendations found.";

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// A message shown above the results.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    Warning(String),
    Error(String),
}

/// Progress reports from the generation worker.
#[derive(Debug)]
enum WorkerEvent {
    Rendered(Recommendation),
    Failed(String),
    Finished,
}

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded review table, never mutated after load.
    pub table: ReviewTable,

    /// Where `table` came from.
    pub data_path: PathBuf,

    /// Current make / topic selection.
    pub selection: Selection,

    /// Top candidates for the current selection, recomputed on every change.
    pub candidates: Vec<Candidate>,

    /// Recommendations of the last run, in ranked order.
    pub recommendations: Vec<Recommendation>,

    /// Outcome of the last run that is not a recommendation.
    pub notice: Option<Notice>,

    /// Status / error message shown in the top bar.
    pub status_message: Option<String>,

    /// Colours per offered topic.
    pub topic_colors: ColorMap,

    recommender: Recommender,
    worker: Option<Receiver<WorkerEvent>>,
}

impl AppState {
    pub fn new(table: ReviewTable, data_path: PathBuf, recommender: Recommender) -> Self {
        let mut state = Self {
            table: ReviewTable::default(),
            data_path: PathBuf::new(),
            selection: Selection::default(),
            candidates: Vec::new(),
            recommendations: Vec::new(),
            notice: None,
            status_message: None,
            topic_colors: ColorMap::default(),
            recommender,
            worker: None,
        };
        state.set_table(table, data_path);
        state
    }

    /// Swap in a newly loaded table and reset everything derived from it.
    pub fn set_table(&mut self, table: ReviewTable, data_path: PathBuf) {
        self.topic_colors = ColorMap::new(&table.topics);
        self.table = table;
        self.data_path = data_path;
        self.selection = Selection::default();
        self.recommendations.clear();
        self.notice = None;
        self.status_message = None;
        self.refilter();
    }

    /// Recompute the candidates from scratch for the current selection.
    pub fn refilter(&mut self) {
        self.candidates = rank_candidates(&self.table, &self.selection);
        log::debug!(
            "{} candidates for topics {:?} / makes {:?}",
            self.candidates.len(),
            self.selection.topics,
            self.selection.makes
        );
    }

    /// Toggle a topic. Values the table does not offer are ignored.
    pub fn toggle_topic(&mut self, topic: &str) {
        let mut next = self.selection.clone();
        if !next.topics.remove(topic) {
            next.topics.insert(topic.to_string());
        }
        self.apply_selection(next);
    }

    /// Toggle a make. Values the table does not offer are ignored.
    pub fn toggle_make(&mut self, make: &str) {
        let mut next = self.selection.clone();
        if !next.makes.remove(make) {
            next.makes.insert(make.to_string());
        }
        self.apply_selection(next);
    }

    fn apply_selection(&mut self, next: Selection) {
        self.selection = next.restricted_to(&self.table);
        self.refilter();
    }

    pub fn clear_topics(&mut self) {
        self.selection.topics.clear();
        self.refilter();
    }

    pub fn clear_makes(&mut self) {
        self.selection.makes.clear();
        self.refilter();
    }

    pub fn is_busy(&self) -> bool {
        self.worker.is_some()
    }

    /// The "Recommend" action: rank afresh, then generate one write-up per
    /// candidate on a background thread. `repaint` is called whenever a new
    /// event is waiting in [`AppState::poll_worker`].
    pub fn start_recommendation<R>(&mut self, repaint: R)
    where
        R: Fn() + Send + 'static,
    {
        if self.is_busy() {
            return;
        }
        self.refilter();
        self.recommendations.clear();
        self.notice = None;

        if self.candidates.is_empty() {
            log::info!("No candidates for the current selection");
            self.notice = Some(Notice::Warning(NO_RECOMMENDATIONS.to_string()));
            return;
        }

        let (tx, rx) = mpsc::channel();
        let recommender = self.recommender.clone();
        let candidates = self.candidates.clone();

        thread::spawn(move || {
            let result = recommender.run(&candidates, |rec| {
                let _ = tx.send(WorkerEvent::Rendered(rec));
                repaint();
            });
            if let Err(e) = result {
                let _ = tx.send(WorkerEvent::Failed(e.to_string()));
            }
            let _ = tx.send(WorkerEvent::Finished);
            repaint();
        });

        self.worker = Some(rx);
    }

    /// Drain finished work from the generation worker.
    pub fn poll_worker(&mut self) {
        let Some(rx) = &self.worker else {
            return;
        };
        let mut done = false;
        loop {
            match rx.try_recv() {
                Ok(WorkerEvent::Rendered(rec)) => self.recommendations.push(rec),
                Ok(WorkerEvent::Failed(msg)) => self.notice = Some(Notice::Error(msg)),
                Ok(WorkerEvent::Finished) | Err(TryRecvError::Disconnected) => {
                    done = true;
                    break;
                }
                Err(TryRecvError::Empty) => break,
            }
        }
        if done {
            self.worker = None;
        }
    }
}
