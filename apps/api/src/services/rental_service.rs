//! Rental transaction manager.
//!
//! Checkout and return, each applied as one unit of work against the
//! inventory ledger and the rental store.
//!
//! ## Checkout
//! ```text
//! ids well-formed? ──no──► BadRequest
//!      │
//! customer exists? ──no──► "Invalid customer."
//!      │
//! movie exists?    ──no──► "Invalid movie."
//!      │
//! ┌────▼──────────── unit of work ─────────────────────┐
//! │ ledger.decrement ──OutOfStock──► "Movie not in stock."
//! │      │                                              │
//! │ pair already open? ──yes──► rollback ► BadRequest   │
//! │      │                                              │
//! │ rentals.insert   ──error──► rollback ► Internal     │
//! │      │                                              │
//! │ commit                                              │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! ## Return
//! ```text
//! ids well-formed? ──no──► BadRequest
//!      │
//! rental for pair? ──no──► NotFound
//!      │
//! still open?      ──no──► AlreadyReturned
//!      │
//! fee = rate × whole days out
//!      │
//! ┌────▼──────────── unit of work ─────────────────────┐
//! │ rentals.close (only if still open) ──0 rows──► AlreadyReturned
//! │ ledger.increment ──movie deleted──► warn, keep going│
//! │ commit                                              │
//! └─────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use reel_core::validation::validate_uuid;
use reel_core::{Clock, CoreError, CoreResult, Identity, Rental};
use reel_db::repository::generate_id;
use reel_db::{Database, LedgerError, UnitOfWork};
use tracing::{error, info, warn};

/// Runs checkouts and returns.
pub struct RentalManager {
    db: Database,
    clock: Arc<dyn Clock>,
}

impl RentalManager {
    pub fn new(db: Database, clock: Arc<dyn Clock>) -> Self {
        RentalManager { db, clock }
    }

    /// Rents a movie to a customer.
    ///
    /// Stock goes down by one and a rental is recorded, both or neither.
    pub async fn checkout(
        &self,
        identity: &Identity,
        customer_id: &str,
        movie_id: &str,
    ) -> CoreResult<Rental> {
        validate_uuid("customerId", customer_id)?;
        validate_uuid("movieId", movie_id)?;

        let customer = self
            .db
            .customers()
            .get_by_id(customer_id)
            .await?
            .ok_or_else(|| CoreError::InvalidCustomer(customer_id.to_string()))?;

        let movie = self
            .db
            .movies()
            .get_by_id(movie_id)
            .await?
            .ok_or_else(|| CoreError::InvalidMovie(movie_id.to_string()))?;

        let rental = Rental {
            id: generate_id(),
            customer: (&customer).into(),
            movie: (&movie).into(),
            date_out: self.clock.now(),
            date_returned: None,
            rental_fee: None,
        };

        let mut uow = self.db.begin().await?;

        let remaining = match self.db.ledger().decrement(&mut uow, movie_id).await {
            Ok(remaining) => remaining,
            Err(LedgerError::OutOfStock { .. }) => {
                warn!(movie_id = %movie_id, customer_id = %customer_id, "Checkout rejected: out of stock");
                abort(uow).await;
                return Err(CoreError::NotInStock {
                    movie_id: movie_id.to_string(),
                });
            }
            Err(LedgerError::NotFound { .. }) => {
                // deleted between lookup and decrement
                abort(uow).await;
                return Err(CoreError::InvalidMovie(movie_id.to_string()));
            }
            Err(e) => {
                error!(movie_id = %movie_id, error = %e, "Stock decrement failed");
                abort(uow).await;
                return Err(CoreError::internal(e.to_string()));
            }
        };

        // checked after the decrement so the unit already holds the write lock
        match self.db.rentals().has_open(&mut uow, customer_id, movie_id).await {
            Ok(false) => {}
            Ok(true) => {
                warn!(movie_id = %movie_id, customer_id = %customer_id, "Checkout rejected: rental already open");
                abort(uow).await;
                return Err(CoreError::AlreadyRented {
                    customer_id: customer_id.to_string(),
                    movie_id: movie_id.to_string(),
                });
            }
            Err(e) => {
                error!(movie_id = %movie_id, error = %e, "Open rental lookup failed");
                abort(uow).await;
                return Err(CoreError::internal(e.to_string()));
            }
        }

        if let Err(e) = self.db.rentals().insert(&mut uow, &rental).await {
            error!(rental_id = %rental.id, error = %e, "Rental insert failed, rolling back");
            abort(uow).await;
            return Err(CoreError::internal(e.to_string()));
        }

        uow.commit().await?;

        info!(
            rental_id = %rental.id,
            customer_id = %customer_id,
            movie_id = %movie_id,
            user_id = %identity.user_id,
            remaining = remaining,
            "Movie checked out"
        );
        Ok(rental)
    }

    /// Closes the customer's rental of a movie and computes its fee.
    pub async fn return_rental(
        &self,
        identity: &Identity,
        customer_id: &str,
        movie_id: &str,
    ) -> CoreResult<Rental> {
        validate_uuid("customerId", customer_id)?;
        validate_uuid("movieId", movie_id)?;

        let rental = self
            .db
            .rentals()
            .find_for_pair(customer_id, movie_id)
            .await?
            .ok_or_else(|| CoreError::RentalNotFound {
                customer_id: customer_id.to_string(),
                movie_id: movie_id.to_string(),
            })?;

        if !rental.is_open() {
            return Err(CoreError::AlreadyReturned {
                rental_id: rental.id,
            });
        }

        let now = self.clock.now();
        let fee = rental.fee_at(now);

        let mut uow = self.db.begin().await?;

        let closed = match self.db.rentals().close(&mut uow, &rental.id, now, fee).await {
            Ok(closed) => closed,
            Err(e) => {
                error!(rental_id = %rental.id, error = %e, "Closing rental failed");
                abort(uow).await;
                return Err(CoreError::internal(e.to_string()));
            }
        };

        if !closed {
            // a concurrent return got there first
            abort(uow).await;
            return Err(CoreError::AlreadyReturned {
                rental_id: rental.id,
            });
        }

        match self.db.ledger().increment(&mut uow, &rental.movie.id).await {
            Ok(_) => {}
            Err(LedgerError::NotFound { .. }) => {
                warn!(
                    rental_id = %rental.id,
                    movie_id = %rental.movie.id,
                    "Returned movie is no longer in the catalog, stock not restored"
                );
            }
            Err(e) => {
                error!(rental_id = %rental.id, error = %e, "Stock increment failed, rolling back");
                abort(uow).await;
                return Err(CoreError::internal(e.to_string()));
            }
        }

        uow.commit().await?;

        info!(
            rental_id = %rental.id,
            user_id = %identity.user_id,
            fee = %fee,
            "Movie returned"
        );

        Ok(Rental {
            date_returned: Some(now),
            rental_fee: Some(fee),
            ..rental
        })
    }
}

/// Rolls back, logging a failed rollback instead of masking the original error.
async fn abort(uow: UnitOfWork) {
    if let Err(e) = uow.rollback().await {
        error!(error = %e, "Rollback failed");
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
