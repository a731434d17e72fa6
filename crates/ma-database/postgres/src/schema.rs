/*
 *
 *
 *
 *
 * MIT License
 * Copyright (c) 2025. Dwight J. Browne
 * dwight[-dot-]browne[-at-]dwightjbrowne[-dot-]com
 *
 *
 * Permission is hereby granted, free of charge, to any person obtaining a copy
 * of this software and associated documentation files (the "Software"), to deal
 * in the Software without restriction, including without limitation the rights
 * to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
 * copies of the Software, and to permit persons to whom the Software is
 * furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice shall be included in all
 * copies or substantial portions of the Software.
 *
 * THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
 * IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
 * FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
 * AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
 * LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
 * OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
 * SOFTWARE.
 */

// Mirrors migrations/2025-01-01-000000_create_layers/up.sql

pub mod bronze {
  diesel::table! {
      use diesel::sql_types::*;

      bronze.ot_glb_deal (id) {
          id -> Int8,
          dealid -> Text,
          companyid -> Nullable<Text>,
          companyname -> Nullable<Text>,
          dealdate -> Nullable<Date>,
          announceddate -> Nullable<Date>,
          dealsize -> Nullable<Float8>,
          dealstatus -> Nullable<Text>,
          dealtype -> Nullable<Text>,
          percentacquired -> Nullable<Float8>,
          nativecurrencyofdeal -> Nullable<Text>,
      }
  }

  diesel::table! {
      use diesel::sql_types::*;

      bronze.ot_glb_company (id) {
          id -> Int8,
          companyid -> Text,
          companyname -> Nullable<Text>,
          ticker -> Nullable<Text>,
          hqglobalsubregion -> Nullable<Text>,
          ownershipstatus -> Nullable<Text>,
          primaryindustrysector -> Nullable<Text>,
      }
  }

  diesel::table! {
      use diesel::sql_types::*;

      bronze.ot_glb_companybuysiderelation (id) {
          id -> Int8,
          companyid -> Text,
          targetcompanyid -> Nullable<Text>,
          targetcompanyname -> Nullable<Text>,
          dealdate -> Nullable<Date>,
      }
  }

  diesel::table! {
      use diesel::sql_types::*;

      bronze.ot_glb_companyindustryrelation (id) {
          id -> Int8,
          companyid -> Text,
          industrysector -> Nullable<Text>,
      }
  }

  diesel::table! {
      use diesel::sql_types::*;

      bronze.ccmxpf_lnkhist (id) {
          id -> Int8,
          gvkey -> Text,
          lpermno -> Nullable<Int8>,
          lpermco -> Nullable<Int8>,
          linktype -> Nullable<Text>,
          linkprim -> Nullable<Text>,
          linkdt -> Nullable<Date>,
          linkenddt -> Nullable<Date>,
      }
  }

  diesel::table! {
      use diesel::sql_types::*;

      bronze.fundq (id) {
          id -> Int8,
          gvkey -> Text,
          tic -> Nullable<Text>,
          datadate -> Nullable<Date>,
          apdedateq -> Nullable<Date>,
          fyearq -> Nullable<Int4>,
          fqtr -> Nullable<Int4>,
          dlttq -> Nullable<Float8>,
          dlcq -> Nullable<Float8>,
          cheq -> Nullable<Float8>,
          prccq -> Nullable<Float8>,
          cshoq -> Nullable<Float8>,
          oibdpq -> Nullable<Float8>,
      }
  }

  diesel::table! {
      use diesel::sql_types::*;

      bronze.dsf (id) {
          id -> Int8,
          permno -> Int8,
          permco -> Nullable<Int8>,
          date -> Date,
          prc -> Nullable<Float8>,
          vol -> Nullable<Float8>,
          ret -> Nullable<Float8>,
          shrout -> Nullable<Float8>,
          cfacpr -> Nullable<Float8>,
      }
  }
}

pub mod silver {
  diesel::table! {
      use diesel::sql_types::*;

      silver.deal_financials_linked (id) {
          id -> Int8,
          dealid -> Text,
          announceddate -> Date,
          dealstatus -> Nullable<Text>,
          dealsize -> Float8,
          target_company_name -> Text,
          acquirer_name -> Nullable<Text>,
          acquirer_ticker -> Text,
          primaryindustrysector -> Nullable<Text>,
          period_end_pre -> Date,
          stock_price_pre -> Float8,
          shares_outstanding_pre -> Float8,
          long_term_debt_pre -> Float8,
          current_debt_pre -> Nullable<Float8>,
          cash_pre -> Float8,
          ebitda_pre -> Nullable<Float8>,
          period_end_post -> Date,
          stock_price_post -> Float8,
          shares_outstanding_post -> Float8,
          long_term_debt_post -> Float8,
          current_debt_post -> Nullable<Float8>,
          cash_post -> Float8,
          ebitda_post -> Nullable<Float8>,
      }
  }
}

pub mod gold {
  diesel::table! {
      use diesel::sql_types::*;

      gold.final_data (id) {
          id -> Int8,
          dealid -> Text,
          acquirer_ticker -> Text,
          primaryindustrysector -> Nullable<Text>,
          dealsize -> Float8,
          market_cap_pre -> Float8,
          ev_pre -> Float8,
          ebitda_pre -> Float8,
          market_cap_post -> Float8,
          ev_post -> Float8,
          ebitda_post -> Float8,
          delta_ev_pct -> Float8,
          delta_mkt_cap_pct -> Float8,
          delta_ebitda_pct -> Float8,
          deal_size_ratio -> Float8,
      }
  }
}
