/*!

This is the long-form manual for `topsis_ranking` and the `topsis` program.

## The procedure

TOPSIS ranks alternatives by their closeness to an ideal solution. Given a decision
matrix with one row per alternative and one column per criterion:

1. every column is divided by its Euclidean norm
2. every column is multiplied by the weight of its criterion
3. the ideal best value of a column is its maximum if the criterion should be maximized
   (`+`), its minimum otherwise (`-`). The ideal worst value is the opposite.
4. for each alternative, the Euclidean distances to the ideal best point and the ideal worst
   point are computed
5. the score is `distance to worst / (distance to best + distance to worst)`, between 0 and 1
6. alternatives are ranked by decreasing score

Tied scores share the average of the positions they occupy, and this average is then
truncated. Three alternatives tied just after the best one all get rank 3 (the average
of 2, 3 and 4), two alternatives tied for the first place both get rank 1.

Some inputs do not have a ranking and are rejected:
- a criterion that only contains zeros cannot be normalized
- an alternative that is at the same time the ideal best and the ideal worst solution (for
  example, when there is only one alternative) does not have a score

## Input formats

### Delimited text

The first row is the header. The first column contains the names of the alternatives,
all the other columns are criteria and must contain numbers.

```text
Model,Price,Storage,Camera,Looks
M1,250,16,12,5
M2,200,16,8,3
M3,300,32,16,4
```

The delimiter is a comma by default and can be changed with `--delimiter`.
Empty cells are not accepted.

### Excel

Files ending with `.xlsx`, `.xlsm`, `.xls` or `.ods` are read as spreadsheets, with the same
layout as above. The first worksheet is used unless `--excel-worksheet-name` is provided.

## Running

```bash
topsis data.csv "1,1,1,2" "-,+,+,+" result.csv
```

The weights are positive numbers and do not need to sum to 1. The impacts are `+`
(higher is better) or `-` (lower is better). There must be exactly one weight and one
impact per criterion.

The output contains the input columns followed by `Topsis Score` and `Rank`.

```text
Model,Price,Storage,Camera,Looks,Topsis Score,Rank
M1,250,16,12,5,0.6808960957683071,1
```

Options:
- `--summary <path or stdout>` writes a JSON summary of the ranking
- `--reference <path>` checks that the output is identical to a reference file and prints
  the differences otherwise
- `--verbose` turns on verbose logging. The `RUST_LOG` variable is also honored.

Nothing is written when an error occurs.

 */
