//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};

use navi_app::domain::{
    keywords::{
        MockKeywordsService,
        records::{KeywordRecord, KeywordUuid},
    },
    listings::{
        MockListingsService,
        records::{
            ImageRecord, ImageUuid, Inventory, Listing, ListingRecord, ListingUuid, SellStatus,
        },
    },
};

use crate::state::State;

fn service(listings: MockListingsService, keywords: MockKeywordsService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(Arc::new(State::new(
                Arc::new(listings),
                Arc::new(keywords),
            ))))
            .push(route),
    )
}

pub(crate) fn listings_service(listings: MockListingsService, route: Router) -> Service {
    service(listings, MockKeywordsService::new(), route)
}

pub(crate) fn keywords_service(keywords: MockKeywordsService, route: Router) -> Service {
    service(MockListingsService::new(), keywords, route)
}

pub(crate) fn make_listing(uuid: ListingUuid) -> Listing {
    Listing {
        record: ListingRecord {
            uuid,
            name: "Desk".to_owned(),
            price: 50_000,
            inventory: Inventory::Stock(1),
            description: None,
            status: SellStatus::Sell,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
            deleted_at: None,
        },
        images: vec![ImageRecord {
            uuid: ImageUuid::new(),
            url: "desk.png".to_owned(),
            alt: "Desk".to_owned(),
        }],
        keywords: vec![
            KeywordRecord {
                uuid: KeywordUuid::new(),
                name: "furniture".to_owned(),
            },
            KeywordRecord {
                uuid: KeywordUuid::new(),
                name: "home".to_owned(),
            },
        ],
    }
}
