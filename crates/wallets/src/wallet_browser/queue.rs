use std::collections::{HashMap, VecDeque};

use uuid::Uuid;

use crate::wallet_browser::types::BrowserContractCall;

/// Something that is queued under a unique id.
pub(crate) trait Request {
    fn id(&self) -> Uuid;
}

impl Request for BrowserContractCall {
    fn id(&self) -> Uuid {
        self.id
    }
}

/// FIFO of pending requests plus the responses that arrived for them.
#[derive(Debug)]
pub(crate) struct RequestQueue<Req, Res> {
    requests: VecDeque<Req>,
    responses: HashMap<Uuid, Res>,
}

impl<Req, Res> Default for RequestQueue<Req, Res> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Req, Res> RequestQueue<Req, Res> {
    pub fn new() -> Self {
        Self { requests: VecDeque::new(), responses: HashMap::new() }
    }

    /// Store a response, replacing any earlier one for the same id.
    pub fn add_response(&mut self, id: Uuid, response: Res) {
        self.responses.insert(id, response);
    }

    /// Take the response for `id`.
    pub fn get_response(&mut self, id: &Uuid) -> Option<Res> {
        self.responses.remove(id)
    }
}

impl<Req: Request, Res> RequestQueue<Req, Res> {
    pub fn add_request(&mut self, request: Req) {
        self.requests.push_back(request);
    }

    pub fn has_request(&self, id: &Uuid) -> bool {
        self.requests.iter().any(|req| req.id() == *id)
    }

    /// The oldest pending request, left in place.
    pub fn read_request(&self) -> Option<&Req> {
        self.requests.front()
    }

    pub fn remove_request(&mut self, id: &Uuid) {
        self.requests.retain(|req| req.id() != *id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Req(Uuid);

    impl Request for Req {
        fn id(&self) -> Uuid {
            self.0
        }
    }

    #[test]
    fn serves_requests_in_order() {
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        let mut queue = RequestQueue::<Req, &str>::new();
        assert!(queue.read_request().is_none());

        queue.add_request(Req(a));
        queue.add_request(Req(b));
        assert_eq!(queue.read_request(), Some(&Req(a)));
        assert!(queue.has_request(&b));

        queue.remove_request(&a);
        assert_eq!(queue.read_request(), Some(&Req(b)));
        assert!(!queue.has_request(&a));
    }

    #[test]
    fn responses_are_taken_once() {
        let id = Uuid::new_v4();
        let mut queue = RequestQueue::<Req, &str>::new();
        queue.add_response(id, "0xabc");
        assert_eq!(queue.get_response(&id), Some("0xabc"));
        assert_eq!(queue.get_response(&id), None);
    }
}
