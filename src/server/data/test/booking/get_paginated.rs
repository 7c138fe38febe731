use super::*;

fn filter() -> BookingFilter {
    BookingFilter {
        per_page: 10,
        ..Default::default()
    }
}

/// Tests that guests only see their own bookings.
///
/// Expected: one booking, made by the guest
#[tokio::test]
async fn guest_scope_returns_own_bookings() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_booking_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_host, listing, guest) = create_booking_dependencies(db).await?;
    let other_guest = test_utils::factory::create_user(db).await?;
    BookingFactory::new(db, listing.id, guest.id)
        .dates(date(2030, 1, 1), date(2030, 1, 3))
        .build()
        .await?;
    BookingFactory::new(db, listing.id, other_guest.id)
        .dates(date(2030, 2, 1), date(2030, 2, 3))
        .build()
        .await?;

    let (rows, total) = BookingRepository::new(db)
        .get_paginated(BookingScope::GuestOf(guest.id), &filter())
        .await?;

    assert_eq!(total, 1);
    assert_eq!(rows[0].0.guest_id, guest.id);

    Ok(())
}

/// Tests that hosts see bookings on their listings only.
///
/// Expected: the booking on the host's listing, not the other host's
#[tokio::test]
async fn host_scope_returns_bookings_on_hosted_listings() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_booking_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (host, listing, guest) = create_booking_dependencies(db).await?;
    let (_other_host, other_listing, _) = create_booking_dependencies(db).await?;
    test_utils::factory::create_booking(db, listing.id, guest.id).await?;
    test_utils::factory::create_booking(db, other_listing.id, guest.id).await?;

    let (rows, total) = BookingRepository::new(db)
        .get_paginated(BookingScope::HostedBy(host.id), &filter())
        .await?;

    assert_eq!(total, 1);
    assert_eq!(rows[0].1.host_id, host.id);

    Ok(())
}

/// Tests status and date filters together with the unrestricted scope.
///
/// Expected: only the confirmed booking inside the date window
#[tokio::test]
async fn filters_by_status_and_dates() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_booking_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_host, listing, guest) = create_booking_dependencies(db).await?;
    let wanted = BookingFactory::new(db, listing.id, guest.id)
        .dates(date(2030, 3, 1), date(2030, 3, 4))
        .status("confirmed")
        .build()
        .await?;
    BookingFactory::new(db, listing.id, guest.id)
        .dates(date(2030, 3, 10), date(2030, 3, 12))
        .build()
        .await?;
    BookingFactory::new(db, listing.id, guest.id)
        .dates(date(2030, 5, 1), date(2030, 5, 4))
        .status("confirmed")
        .build()
        .await?;

    let (rows, total) = BookingRepository::new(db)
        .get_paginated(
            BookingScope::All,
            &BookingFilter {
                status: Some(BookingStatus::Confirmed),
                starts_on_or_after: Some(date(2030, 3, 1)),
                ends_on_or_before: Some(date(2030, 3, 31)),
                ..filter()
            },
        )
        .await?;

    assert_eq!(total, 1);
    assert_eq!(rows[0].0.id, wanted.id);

    Ok(())
}
