use super::*;

/// Tests that inactive and soft-deleted listings never appear in search results.
///
/// Expected: only the active listing
#[tokio::test]
async fn returns_only_live_active_listings() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_booking_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let host = create_user(db).await?;
    let active = create_listing(db, host.id).await?;
    ListingFactory::new(db, host.id).active(false).build().await?;
    let deleted = create_listing(db, host.id).await?;

    let repo = ListingRepository::new(db);
    repo.soft_delete(deleted.id).await?;

    let (listings, total) = repo.search(&search()).await?;

    assert_eq!(total, 1);
    assert_eq!(listings[0].id, active.id);

    Ok(())
}

/// Tests the case-insensitive city substring filter.
///
/// Expected: "Lisbon" matches "lisb", "Porto" does not
#[tokio::test]
async fn filters_by_city_substring() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_booking_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let host = create_user(db).await?;
    let lisbon = ListingFactory::new(db, host.id).city("Lisbon").build().await?;
    ListingFactory::new(db, host.id).city("Porto").build().await?;

    let (listings, total) = ListingRepository::new(db)
        .search(&ListingSearch {
            city: Some("lisb".to_string()),
            ..search()
        })
        .await?;

    assert_eq!(total, 1);
    assert_eq!(listings[0].id, lisbon.id);

    Ok(())
}

/// Tests the inclusive price bounds and ascending price sort.
///
/// Expected: listings priced 80.00 and 120.00, cheapest first
#[tokio::test]
async fn filters_and_sorts_by_price() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_booking_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let host = create_user(db).await?;
    ListingFactory::new(db, host.id).price_cents(5_000).build().await?;
    let dearer = ListingFactory::new(db, host.id).price_cents(12_000).build().await?;
    let cheaper = ListingFactory::new(db, host.id).price_cents(8_000).build().await?;
    ListingFactory::new(db, host.id).price_cents(20_000).build().await?;

    let (listings, _) = ListingRepository::new(db)
        .search(&ListingSearch {
            price_min_cents: Some(8_000),
            price_max_cents: Some(12_000),
            sort: ListingSort::PriceAsc,
            ..search()
        })
        .await?;

    let ids: Vec<_> = listings.iter().map(|l| l.id).collect();
    assert_eq!(ids, vec![cheaper.id, dearer.id]);

    Ok(())
}

/// Tests that the amenity filter requires every requested amenity.
///
/// Expected: only the listing with both amenities
#[tokio::test]
async fn requires_all_amenities() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_booking_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let host = create_user(db).await?;
    let wifi = create_amenity(db, "Wifi").await?;
    let pool = create_amenity(db, "Pool").await?;
    let both = create_listing(db, host.id).await?;
    let wifi_only = create_listing(db, host.id).await?;
    attach_amenity(db, wifi.id, both.id).await?;
    attach_amenity(db, pool.id, both.id).await?;
    attach_amenity(db, wifi.id, wifi_only.id).await?;

    let (listings, total) = ListingRepository::new(db)
        .search(&ListingSearch {
            amenities: vec![wifi.id, pool.id],
            ..search()
        })
        .await?;

    assert_eq!(total, 1);
    assert_eq!(listings[0].id, both.id);

    Ok(())
}

/// Tests that listings booked during the requested stay are excluded.
///
/// Expected: the free listing only; cancelled bookings do not exclude
#[tokio::test]
async fn excludes_listings_booked_for_stay() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_booking_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let host = create_user(db).await?;
    let guest = create_user(db).await?;
    let booked = create_listing(db, host.id).await?;
    let cancelled = create_listing(db, host.id).await?;
    let start = NaiveDate::from_ymd_opt(2030, 6, 10).unwrap();
    let end = NaiveDate::from_ymd_opt(2030, 6, 15).unwrap();
    BookingFactory::new(db, booked.id, guest.id)
        .dates(start, end)
        .build()
        .await?;
    BookingFactory::new(db, cancelled.id, guest.id)
        .dates(start, end)
        .status("cancelled")
        .build()
        .await?;

    let (listings, total) = ListingRepository::new(db)
        .search(&ListingSearch {
            stay: Some(StayRange::new(start, end).unwrap()),
            ..search()
        })
        .await?;

    assert_eq!(total, 1);
    assert_eq!(listings[0].id, cancelled.id);

    Ok(())
}

/// Tests the minimum rating and guest capacity filters.
///
/// Expected: only the listing rated 4.50 hosting 4 guests
#[tokio::test]
async fn filters_by_rating_and_capacity() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_booking_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let host = create_user(db).await?;
    let wanted = ListingFactory::new(db, host.id)
        .rating(450, 2)
        .max_guests(4)
        .build()
        .await?;
    ListingFactory::new(db, host.id)
        .rating(350, 2)
        .max_guests(4)
        .build()
        .await?;
    ListingFactory::new(db, host.id)
        .rating(500, 1)
        .max_guests(2)
        .build()
        .await?;

    let (listings, total) = ListingRepository::new(db)
        .search(&ListingSearch {
            min_rating_hundredths: Some(400),
            min_guests: Some(3),
            ..search()
        })
        .await?;

    assert_eq!(total, 1);
    assert_eq!(listings[0].id, wanted.id);

    Ok(())
}

/// Tests page size and total count.
///
/// Expected: 2 of 3 on the first page, total 3
#[tokio::test]
async fn paginates_results() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_booking_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let host = create_user(db).await?;
    for _ in 0..3 {
        create_listing(db, host.id).await?;
    }

    let (listings, total) = ListingRepository::new(db)
        .search(&ListingSearch {
            per_page: 2,
            ..search()
        })
        .await?;

    assert_eq!(total, 3);
    assert_eq!(listings.len(), 2);

    Ok(())
}
