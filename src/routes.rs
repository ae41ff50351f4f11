use crate::{api, config::Config};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    // Helper to build per-route limiter
    fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
        let per_ms = if requests_per_min == 0 {
            1
        } else {
            60_000 / requests_per_min as u64
        };
        let cfg = GovernorConfigBuilder::default()
            .per_millisecond(per_ms)
            .burst_size(requests_per_min)
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .unwrap();
        Governor::new(&cfg)
    }

    cfg.service(
        web::scope(&config.api_prefix)
            .service(
                web::resource("/employee")
                    .wrap(build_limiter(config.rate_write_per_min))
                    .route(web::put().to(api::employee::create_employee)),
            )
            .service(
                web::resource("/employee/{email}")
                    .route(web::get().to(api::employee::get_employee))
                    .route(web::delete().to(api::employee::delete_employee)),
            )
            .service(
                web::resource("/employee/{email}/availability")
                    .route(web::get().to(api::employee::get_availability)),
            )
            .service(
                web::resource("/employee/{email}/availability/{week}")
                    .wrap(build_limiter(config.rate_write_per_min))
                    .route(web::put().to(api::employee::put_availability_day)),
            )
            .service(
                web::scope("/employees")
                    .wrap(build_limiter(config.rate_read_per_min))
                    .service(web::resource("").route(web::get().to(api::employee::list_employees)))
                    .service(
                        web::resource("/availability/week/{week}")
                            .route(web::get().to(api::employee::week_availability_for_all)),
                    ),
            )
            .service(
                web::scope("/business")
                    .service(
                        web::resource("/timetable")
                            .wrap(build_limiter(config.rate_read_per_min))
                            .route(web::get().to(api::timetable::get_timetable_weeks)),
                    )
                    .service(
                        web::resource("/timetable/default")
                            .route(web::get().to(api::timetable::get_default_timetable))
                            .route(web::put().to(api::timetable::set_default_timetable)),
                    )
                    .service(
                        web::resource("/schedule/{week}")
                            .wrap(build_limiter(config.rate_write_per_min))
                            .route(web::get().to(api::schedule::get_week_schedule))
                            .route(web::put().to(api::schedule::put_week_schedule)),
                    ),
            ),
    );
}
