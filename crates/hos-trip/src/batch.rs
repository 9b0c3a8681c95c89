//! Planning many trips at once.

use hos_core::HosResult;

use crate::{TripPlan, TripPlanner, TripRequest};

impl TripPlanner {
    /// Plan every request, returning results in input order.
    ///
    /// A failing request does not affect the others.  With the `parallel`
    /// Cargo feature, requests are planned on Rayon's thread pool.
    pub fn plan_batch(&self, requests: &[TripRequest]) -> Vec<HosResult<TripPlan>> {
        #[cfg(not(feature = "parallel"))]
        {
            requests.iter().map(|r| self.plan(r)).collect()
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            // Indexed parallel iterators collect in input order.
            requests.par_iter().map(|r| self.plan(r)).collect()
        }
    }
}
