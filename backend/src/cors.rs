use rocket::fairing::{Fairing, Info, Kind};
use rocket::http::Header;
use rocket::{Request, Response};

pub struct CORS {
    allowed_origin: String,
}

impl CORS {
    pub fn new(allowed_origin: String) -> Self {
        Self { allowed_origin }
    }
}

#[rocket::async_trait]
impl Fairing for CORS {
    fn info(&self) -> Info {
        Info {
            name: "CORS",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, req: &'r Request<'_>, res: &mut Response<'r>) {
        let Some(origin) = req.headers().get_one("Origin") else {
            return;
        };

        if origin == self.allowed_origin {
            res.set_header(Header::new("Access-Control-Allow-Origin", origin));
            res.set_header(Header::new("Access-Control-Allow-Methods", "POST, GET, OPTIONS"));
            res.set_header(Header::new("Access-Control-Allow-Headers", "Content-Type"));
            res.set_header(Header::new("Access-Control-Max-Age", "86400"));
        }
    }
}
