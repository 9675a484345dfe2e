mod catalog;
mod database;
mod model;
mod notify;
mod session;

use actix_identity::{CookieIdentityPolicy, Identity, IdentityService};
use actix_session::{CookieSession, Session};
use actix_web::{error, middleware::Logger, web, App, HttpResponse, HttpServer};
use database::*;
use log::{debug, warn};
use model::*;
use notify::Notifier;
use serde::{Deserialize, Serialize};
use session::BookingFlow;
use std::collections::HashMap;

type Tera = web::Data<tera::Tera>;
type Db = web::Data<sled::Db>;
type Dispatcher = web::Data<Box<dyn Notifier>>;
type Query = web::Query<HashMap<String, String>>;

fn log_error<E: std::fmt::Debug>(err: E, message: &'static str) -> error::Error {
    debug!("{:?}", err);
    error::ErrorInternalServerError(message)
}

fn found(location: &str) -> HttpResponse {
    HttpResponse::Found().header("location", location).finish()
}

fn render(tera: &Tera, template: &str, ctx: tera::Context) -> actix_web::Result<HttpResponse> {
    let body = tera
        .render(template, &ctx)
        .map_err(|err| log_error(err, "Template error"))?;
    Ok(HttpResponse::Ok().content_type("text/html").body(body))
}

async fn index(query: Query, tera: Tera) -> actix_web::Result<HttpResponse> {
    let mut ctx = tera::Context::new();
    if query.contains_key("logout") {
        ctx.insert("notice", "You have been logged out.");
    }
    render(&tera, "index.html", ctx)
}

#[derive(Serialize, Deserialize)]
struct AuthParams {
    email: String,
    password: String,
}

async fn register(tera: Tera) -> actix_web::Result<HttpResponse> {
    render(&tera, "register.html", tera::Context::new())
}

async fn register_post(params: web::Form<AuthParams>, db: Db) -> actix_web::Result<HttpResponse> {
    let profile = Profile {
        email: params.email.clone(),
        password_hash: hash_password(&params.password),
    };
    match db
        .create_profile(&profile)
        .map_err(|err| log_error(err, "Database error"))?
    {
        ProfileCreate::Created => Ok(found("/login?registered")),
        ProfileCreate::AlreadyExists => Ok(found("/login?exists")),
    }
}

fn login_notice(query: &HashMap<String, String>) -> Option<&'static str> {
    if query.contains_key("wrong_password") {
        Some("Invalid email or password.")
    } else if query.contains_key("registered") {
        Some("Account created! Please login.")
    } else if query.contains_key("exists") {
        Some("Account already exists.")
    } else {
        None
    }
}

async fn login(query: Query, tera: Tera) -> actix_web::Result<HttpResponse> {
    let mut ctx = tera::Context::new();
    if let Some(notice) = login_notice(&query) {
        ctx.insert("notice", notice);
    }
    render(&tera, "login.html", ctx)
}

async fn login_post(
    params: web::Form<AuthParams>,
    id: Identity,
    db: Db,
) -> actix_web::Result<HttpResponse> {
    let verified = db
        .verify_profile(&params.email, &hash_password(&params.password))
        .map_err(|err| log_error(err, "Database error"))?;
    if verified {
        id.remember(params.email.clone());
        return Ok(found("/home"));
    }
    Ok(found("/login?wrong_password"))
}

async fn home(id: Identity, tera: Tera) -> actix_web::Result<HttpResponse> {
    let user = match id.identity() {
        Some(user) => user,
        None => return Ok(found("/login")),
    };
    let mut ctx = tera::Context::new();
    ctx.insert("user", &user);
    ctx.insert("now_showing", &catalog::now_showing());
    ctx.insert("coming_soon", &catalog::coming_soon());
    ctx.insert("top_rated", &catalog::top_rated());
    render(&tera, "home.html", ctx)
}

async fn booking(id: Identity, tera: Tera) -> actix_web::Result<HttpResponse> {
    if id.identity().is_none() {
        return Ok(found("/login"));
    }
    let mut ctx = tera::Context::new();
    ctx.insert("movie", catalog::BOOKING_MOVIE);
    render(&tera, "booking_form.html", ctx)
}

#[derive(Serialize, Deserialize)]
struct BookingParams {
    seat: String,
    date: String,
    time: String,
}

async fn booking_post(
    params: web::Form<BookingParams>,
    id: Identity,
    session: Session,
) -> actix_web::Result<HttpResponse> {
    if id.identity().is_none() {
        return Ok(found("/login"));
    }
    let params = params.into_inner();
    session.set_pending_booking(&PendingBooking {
        movie: catalog::BOOKING_MOVIE.to_owned(),
        seat: params.seat,
        date: params.date,
        time: params.time,
    })?;
    Ok(found("/payment"))
}

async fn payment(id: Identity, session: Session, tera: Tera) -> actix_web::Result<HttpResponse> {
    if id.identity().is_none() {
        return Ok(found("/login"));
    }
    let draft = match session.pending_booking() {
        Some(draft) => draft,
        None => return Ok(found("/login")),
    };
    let mut ctx = tera::Context::new();
    ctx.insert("booking", &draft);
    render(&tera, "payment.html", ctx)
}

async fn payment_post(
    id: Identity,
    session: Session,
    db: Db,
    dispatcher: Dispatcher,
) -> actix_web::Result<HttpResponse> {
    let user = match id.identity() {
        Some(user) => user,
        None => return Ok(found("/login")),
    };
    let draft = match session.pending_booking() {
        Some(draft) => draft,
        None => return Ok(found("/login")),
    };

    let booking = Booking::finalize(draft, &user);
    db.put_booking(&booking)
        .map_err(|err| log_error(err, "Database error"))?;
    session.set_last_booking(&booking)?;
    if let Err(err) = dispatcher.notify(&user, &booking) {
        warn!("Confirmation for booking {} not delivered: {}", booking.id, err);
    }
    session.clear_pending_booking();
    Ok(found("/confirmation"))
}

async fn confirmation(
    id: Identity,
    session: Session,
    tera: Tera,
) -> actix_web::Result<HttpResponse> {
    if id.identity().is_none() {
        return Ok(found("/login"));
    }
    let booking = match session.last_booking() {
        Some(booking) => booking,
        None => return Ok(found("/login")),
    };
    let mut ctx = tera::Context::new();
    ctx.insert("booking", &booking);
    render(&tera, "confirmation.html", ctx)
}

async fn logout(id: Identity, session: Session) -> actix_web::Result<HttpResponse> {
    id.forget();
    session.clear();
    Ok(found("/?logout"))
}

fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index))
        .route("/register", web::get().to(register))
        .route("/register", web::post().to(register_post))
        .route("/login", web::get().to(login))
        .route("/login", web::post().to(login_post))
        .route("/home", web::get().to(home))
        .route("/booking", web::get().to(booking))
        .route("/booking", web::post().to(booking_post))
        .route("/payment", web::get().to(payment))
        .route("/payment", web::post().to(payment_post))
        .route("/confirmation", web::get().to(confirmation))
        .route("/logout", web::get().to(logout));
}

#[actix_rt::main]
async fn main() -> std::io::Result<()> {
    let private_key = [0u8; 32];

    std::env::set_var("RUST_LOG", "moviemagic=debug,actix_web=info");
    std::env::set_var("RUST_BACKTRACE", "1");
    env_logger::init();

    let bind = std::env::var("MOVIEMAGIC_BIND").unwrap_or_else(|_| "127.0.0.1:8080".to_owned());
    let data_dir =
        std::env::var("MOVIEMAGIC_DATA").unwrap_or_else(|_| "moviemagic-data".to_owned());

    let db = sled::open(&data_dir)
        .map_err(|err| std::io::Error::new(std::io::ErrorKind::Other, err))?;
    let dispatcher: Dispatcher = web::Data::new(Box::new(notify::MockEmailer));

    log::info!("MovieMagic running at http://{}", bind);

    HttpServer::new(move || {
        let tera = tera::Tera::new(concat!(env!("CARGO_MANIFEST_DIR"), "/templates/**/*")).unwrap();
        App::new()
            .wrap(Logger::default())
            .wrap(IdentityService::new(
                CookieIdentityPolicy::new(&private_key)
                    .name("auth-cookie")
                    .secure(false),
            ))
            .wrap(
                CookieSession::signed(&private_key)
                    .name("booking-session")
                    .secure(false),
            )
            .data(tera)
            .data(db.clone())
            .app_data(dispatcher.clone())
            .configure(routes)
    })
    .bind(&bind)?
    .run()
    .await
}
