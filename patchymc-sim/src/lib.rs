/// Observer takes observations of a system of a generic type `S`.
///
/// Observers are used to record properties of a system during a simulation;
/// the simulation driver calls the observers registered in an
/// [`ObserversSet`](ObserversSet) as the step loop advances.
pub trait Observer {
    /// The type of objects observed by this observer
    type S;
    /// Takes observations
    fn observe(&mut self, object: &Self::S);
    /// Writes buffered data to the destination stream
    fn flush(&mut self);
}

/// A set of observers that observe a system of a generic type `S`.
///
/// Each observer has its own lag time: it takes an observation every
/// `lag_time` calls to [`observe()`](ObserversSet::observe).
pub struct ObserversSet<S: 'static> {
    n_called: u32,
    observers: Vec<Box<dyn Observer<S = S>>>,
    lag_times: Vec<u32>,
}

impl<S> ObserversSet<S> {
    pub fn new() -> ObserversSet<S> {
        ObserversSet {
            n_called: 0,
            observers: Vec::new(),
            lag_times: Vec::new(),
        }
    }

    /// Registers an observer that fires every `lag_time` calls
    pub fn add_observer(&mut self, o: Box<dyn Observer<S = S>>, lag_time: u32) {
        self.observers.push(o);
        self.lag_times.push(lag_time);
    }

    /// Passes the observed object to every observer whose lag time divides
    /// the current call counter
    pub fn observe(&mut self, object: &S) {
        for i in 0..self.observers.len() {
            if self.n_called % self.lag_times[i] == 0 {
                self.observers[i].observe(object);
            }
        }
        self.n_called += 1;
    }

    /// Calls `flush()` on all observers of this set.
    ///
    /// This typically writes data to streams and clears buffers.
    pub fn flush_observers(&mut self) {
        for o in self.observers.iter_mut() {
            o.flush();
        }
    }
}

impl<S> Default for ObserversSet<S> {
    fn default() -> Self {
        ObserversSet::new()
    }
}
