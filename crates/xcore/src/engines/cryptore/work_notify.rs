// Copyright 2015-2020 Parity Technologies (UK) Ltd.
// This file is part of Xcore.

// Xcore is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// Xcore is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.

// You should have received a copy of the GNU General Public License
// along with Xcore.  If not, see <http://www.gnu.org/licenses/>.

//! Fire-and-forget HTTP notification of new work packages.

use std::{thread, time::Duration};

use crossbeam_channel::{unbounded, Sender};
use url::Url;

use super::remote::Work;

/// Posts every accepted work package to the configured URLs, in acceptance
/// order. Delivery failures are logged and dropped; nothing in the sealing
/// path ever waits for the network.
pub struct WorkPoster {
    queue: Sender<Work>,
}

impl WorkPoster {
    /// A poster for `urls`; `None` when there is nothing to notify.
    pub fn new(urls: &[Url]) -> Option<WorkPoster> {
        if urls.is_empty() {
            return None;
        }
        let client = match reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(5))
            .build()
        {
            Ok(client) => client,
            Err(e) => {
                warn!(target: "miner", "cannot build the work notification client: {}", e);
                return None;
            }
        };

        let urls = urls.to_vec();
        let (queue, notifications) = unbounded::<Work>();
        let spawned = thread::Builder::new()
            .name("work-notify".into())
            .spawn(move || {
                while let Ok(work) = notifications.recv() {
                    let body = [
                        format!("{:#x}", work.seal_hash),
                        format!("{:#x}", work.seed_hash),
                        format!("{:#x}", work.target),
                    ];
                    for url in &urls {
                        match client.post(url.clone()).json(&body).send() {
                            Ok(response) => trace!(
                                target: "miner",
                                "work notification to {} returned {}",
                                url, response.status()
                            ),
                            Err(e) => warn!(
                                target: "miner",
                                "work notification to {} failed: {}",
                                url, e
                            ),
                        }
                    }
                }
            });
        if let Err(e) = spawned {
            warn!(target: "miner", "cannot spawn the work notification thread: {}", e);
            return None;
        }

        Some(WorkPoster { queue })
    }

    /// Queue one work package for delivery.
    pub fn post(&self, work: &Work) {
        let _ = self.queue.send(work.clone());
    }
}
