use crate::model::BlankNode;

/// Issues fresh blank node labels for one materialization run: `{prefix}b0`, `{prefix}b1`, etc.
#[derive(Clone, Debug)]
pub struct BlankNodeIssuer {
    prefix: String,
    counter: u64,
}

impl BlankNodeIssuer {
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
            counter: 0,
        }
    }

    /// An issuer whose prefix is unique to this run, so labels never clash with
    /// blank nodes written into the same graph by an earlier run.
    pub fn unique() -> Self {
        let run = uuid::Uuid::new_v4().simple().to_string();
        Self::new(&format!("u{}", &run[..12]))
    }

    /// Issue the next blank node. Never returns the same label twice.
    pub fn fresh(&mut self) -> BlankNode {
        let node = BlankNode::new(format!("{}b{}", self.prefix, self.counter));
        self.counter += 1;
        node
    }

    /// Number of blank nodes issued so far.
    pub fn issued(&self) -> u64 {
        self.counter
    }
}
